//! Extraction of type declarations and `@Desc` records from Java source

use crate::config::ScanConfig;
use crate::declaration::JavaCompilationUnit;
use crate::errors::{ScanError, ScanResult};
use crate::results::{DeclarationDescriptor, DeclarationFailure};
use crate::visitor::JavaVisitor;
use log::warn;
use mixin_desc::fetch_descriptor;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parse Java source into declaration views ready for `fetch_descriptor`
pub fn parse_compilation_unit(
    source: &str,
    file_path: &Path,
    config: &ScanConfig,
) -> ScanResult<JavaCompilationUnit> {
    let mut parser = Parser::new();
    let language = tree_sitter_java::language();
    parser
        .set_language(&language)
        .map_err(|e| ScanError::ParseError(file_path.to_path_buf(), e.to_string()))?;

    let tree = parser.parse(source, None).ok_or_else(|| {
        ScanError::ParseError(file_path.to_path_buf(), "Failed to parse".to_string())
    })?;

    let root_node = tree.root_node();

    if root_node.has_error() && !config.tolerate_syntax_errors {
        let (line, column) = first_error_position(root_node).unwrap_or((0, 0));
        return Err(ScanError::SyntaxError(
            file_path.to_path_buf(),
            line,
            column,
            "Syntax error".to_string(),
        ));
    }

    let mut visitor = JavaVisitor::new(source.as_bytes(), config.include_nested);
    visitor.visit_node(root_node);

    let mut unit = JavaCompilationUnit::new(file_path);
    unit.package = visitor.package.clone();
    unit.imports = std::mem::take(&mut visitor.imports);
    unit.line_count = source.lines().count();
    unit.declarations = visitor.finish();

    Ok(unit)
}

/// Run `fetch_descriptor` over every declaration of `unit`.
///
/// A malformed `@Desc` fails only its own declaration.
pub fn extract_descriptors(
    unit: &JavaCompilationUnit,
) -> (Vec<DeclarationDescriptor>, Vec<DeclarationFailure>) {
    let mut descriptors = Vec::new();
    let mut failures = Vec::new();

    for decl in &unit.declarations {
        match fetch_descriptor(decl) {
            Ok(Some(record)) => descriptors.push(DeclarationDescriptor {
                declaration: decl.binary_name.clone(),
                kind: decl.kind,
                line_start: decl.line_start,
                line_end: decl.line_end,
                record,
            }),
            Ok(None) => {}
            Err(error) => {
                warn!(
                    "{}:{}: skipping @Desc on {}: {}",
                    unit.file_path.display(),
                    decl.line_start,
                    decl.binary_name,
                    error
                );
                failures.push(DeclarationFailure {
                    declaration: decl.binary_name.clone(),
                    line_start: decl.line_start,
                    error,
                });
            }
        }
    }

    (descriptors, failures)
}

/// 1-indexed position of the first error or missing node
fn first_error_position(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let position = node.start_position();
        return Some((position.row + 1, position.column + 1));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(position) = first_error_position(child) {
                return Some(position);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixin_desc::{DescElement, DescError, TypeBinding, ValueKind};

    fn parse(source: &str) -> JavaCompilationUnit {
        parse_compilation_unit(source, Path::new("Test.java"), &ScanConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_unit_metadata() {
        let source = r#"
package com.example.mixin;

import org.spongepowered.asm.mixin.injection.Desc;
import java.util.*;

public class Holder {
}
"#;
        let unit = parse(source);

        assert_eq!(unit.package.as_deref(), Some("com.example.mixin"));
        assert_eq!(
            unit.imports,
            vec!["org.spongepowered.asm.mixin.injection.Desc", "java.util.*"]
        );
        assert_eq!(unit.declarations.len(), 1);
        assert_eq!(unit.declarations[0].binary_name, "com.example.mixin.Holder");
        assert!(unit.line_count > 0);
        assert!(unit.find("com.example.mixin.Holder").is_some());
    }

    #[test]
    fn test_extract_syntax_error() {
        let source = "public class Broken {\n  int x = ;\n}";
        let result = parse_compilation_unit(source, Path::new("Broken.java"), &ScanConfig::default());

        match result {
            Err(ScanError::SyntaxError(path, line, _, _)) => {
                assert_eq!(path, Path::new("Broken.java"));
                assert_eq!(line, 2);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_tolerates_syntax_errors() {
        let source = "@org.spongepowered.asm.mixin.injection.Desc(\"ok\")\npublic class Broken {\n  int x = ;\n}";
        let unit = parse_compilation_unit(source, Path::new("Broken.java"), &ScanConfig::lenient())
            .unwrap();

        assert_eq!(unit.declarations.len(), 1);
        let (descriptors, failures) = extract_descriptors(&unit);
        assert_eq!(descriptors.len(), 1);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_extract_descriptors() {
        let source = r#"
package p;

import org.spongepowered.asm.mixin.injection.Desc;

@Desc(owner = Target.class, value = "tick", ret = boolean.class, args = { String.class, int.class })
class Annotated {}

class Plain {}
"#;
        let unit = parse(source);
        let (descriptors, failures) = extract_descriptors(&unit);

        assert!(failures.is_empty());
        assert_eq!(descriptors.len(), 1);

        let found = &descriptors[0];
        assert_eq!(found.declaration, "p.Annotated");
        assert_eq!(found.line_start, 6);

        let record = &found.record;
        assert_eq!(record.owner().and_then(|t| t.binary_name()), Some("p.Target"));
        assert_eq!(record.name(), Some("tick"));
        assert_eq!(
            record.return_type().and_then(|t| t.binary_name()),
            Some("boolean")
        );
        let args: Vec<_> = record
            .argument_types()
            .iter()
            .filter_map(|t| t.binary_name())
            .collect();
        assert_eq!(args, vec!["java.lang.String", "int"]);
        assert_eq!(
            record.method_descriptor().as_deref(),
            Some("(Ljava/lang/String;I)Z")
        );
    }

    #[test]
    fn test_extract_malformed_descriptor() {
        let source = r#"
import org.spongepowered.asm.mixin.injection.Desc;

@Desc(NAME)
class Bad {}

@Desc("good")
class Good {}
"#;
        let unit = parse(source);
        let (descriptors, failures) = extract_descriptors(&unit);

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].declaration, "Good");

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].declaration, "Bad");
        assert_eq!(
            failures[0].error,
            DescError::MalformedValue {
                element: DescElement::Value,
                expected: ValueKind::StringLiteral,
                found: ValueKind::Unresolved,
            }
        );
    }

    #[test]
    fn test_extract_unimported_desc_is_ignored() {
        // Without the import, `Desc` binds to the default package.
        let source = "@Desc(\"foo\")\nclass A {}";
        let unit = parse(source);
        let (descriptors, failures) = extract_descriptors(&unit);

        assert!(descriptors.is_empty());
        assert!(failures.is_empty());
    }
}
