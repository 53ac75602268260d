//! Java string literal decoding

/// Decode the source text of a string literal or text block into its value.
///
/// Returns `None` if `raw` is not delimited as a Java string.
pub fn string_literal_value(raw: &str) -> Option<String> {
    if raw.starts_with("\"\"\"") {
        return text_block_value(raw);
    }
    let body = raw.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(body))
}

fn text_block_value(raw: &str) -> Option<String> {
    let body = raw.strip_prefix("\"\"\"")?.strip_suffix("\"\"\"")?;
    let body = body.replace("\r\n", "\n").replace('\r', "\n");
    // content starts after the line terminator following the opening delimiter
    let (_, content) = body.split_once('\n')?;

    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;

    // the closing delimiter line counts even when blank
    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == last || !line.trim().is_empty())
        .map(|(_, line)| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let stripped: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.chars()
                    .skip(indent)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            }
        })
        .collect();

    Some(unescape(&stripped.join("\n")))
}

/// Interpret Java escape sequences.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            // line continuation inside text blocks
            Some('\n') => {}
            Some('u') => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(first @ '0'..='7') => {
                // \0 - \377
                let max_digits = if first <= '3' { 3 } else { 2 };
                let mut value = first.to_digit(8).unwrap_or(0);
                for _ in 1..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if let Some(ch) = char::from_u32(value) {
                    out.push(ch);
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
