use serde::{Deserialize, Serialize};

/// The normalized content of one `@Desc` annotation.
///
/// Absent elements are `None` (or an empty argument list), never a placeholder
/// type, so a resolver can tell "unspecified" apart from "declared as this
/// exact type". The record owns clones of the front-end's bindings and is not
/// tied to the AST it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescRecord<T> {
    owner: Option<T>,
    name: Option<String>,
    return_type: Option<T>,
    argument_types: Vec<T>,
}

impl<T> DescRecord<T> {
    pub fn new(
        owner: Option<T>,
        name: Option<String>,
        return_type: Option<T>,
        argument_types: Vec<T>,
    ) -> Self {
        Self {
            owner,
            name,
            return_type,
            argument_types,
        }
    }

    /// Explicit owning type; `None` means infer from context.
    pub fn owner(&self) -> Option<&T> {
        self.owner.as_ref()
    }

    /// Member name; `None` makes this a partial record the resolver must reject.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared return type; `None` means unspecified.
    pub fn return_type(&self) -> Option<&T> {
        self.return_type.as_ref()
    }

    /// Argument types in positional order.
    pub fn argument_types(&self) -> &[T] {
        &self.argument_types
    }

    /// Whether a member name was written.
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Consume the record, yielding `(owner, name, return_type, argument_types)`.
    pub fn into_parts(self) -> (Option<T>, Option<String>, Option<T>, Vec<T>) {
        (self.owner, self.name, self.return_type, self.argument_types)
    }
}

impl<T> Default for DescRecord<T> {
    fn default() -> Self {
        Self::new(None, None, None, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record: DescRecord<String> = DescRecord::default();
        assert!(record.owner().is_none());
        assert!(record.name().is_none());
        assert!(record.return_type().is_none());
        assert!(record.argument_types().is_empty());
        assert!(!record.has_name());
    }

    #[test]
    fn test_into_parts() {
        let record = DescRecord::new(
            Some("a.Owner"),
            Some("tick".to_string()),
            None,
            vec!["int", "long"],
        );
        let (owner, name, ret, args) = record.into_parts();
        assert_eq!(owner, Some("a.Owner"));
        assert_eq!(name.as_deref(), Some("tick"));
        assert_eq!(ret, None);
        assert_eq!(args, vec!["int", "long"]);
    }

    #[test]
    fn test_record_serialization() {
        let record = DescRecord::new(None, Some("foo".to_string()), None, vec!["int".to_string()]);
        let json = serde_json::to_string(&record).unwrap();
        let back: DescRecord<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert!(json.contains("\"owner\":null"));
    }
}
