use crate::decoder::DescElement;
use crate::value::ValueKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding a `@Desc` annotation
///
/// Each variant is a contract breach of the front-end: a binder that enforces
/// the annotation's element types never produces them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescError {
    /// Element value has the wrong kind
    #[error("Malformed value for element '{element}': expected {expected}, found {found}")]
    MalformedValue {
        element: DescElement,
        expected: ValueKind,
        found: ValueKind,
    },

    /// One entry of an array-valued element has the wrong kind
    #[error("Malformed value at {element}[{index}]: expected {expected}, found {found}")]
    MalformedArrayElement {
        element: DescElement,
        index: usize,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Result type for decoding operations
pub type DescResult<T> = Result<T, DescError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_value_message() {
        let err = DescError::MalformedValue {
            element: DescElement::Value,
            expected: ValueKind::StringLiteral,
            found: ValueKind::Constant,
        };
        assert_eq!(
            err.to_string(),
            "Malformed value for element 'value': expected string literal, found constant"
        );
    }

    #[test]
    fn test_malformed_array_element_message() {
        let err = DescError::MalformedArrayElement {
            element: DescElement::Args,
            index: 1,
            expected: ValueKind::TypeLiteral,
            found: ValueKind::StringLiteral,
        };
        assert_eq!(
            err.to_string(),
            "Malformed value at args[1]: expected type literal, found string literal"
        );
    }
}
