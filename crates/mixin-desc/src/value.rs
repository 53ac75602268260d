use serde::{Deserialize, Serialize};
use std::fmt;

/// A bound annotation element value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementValue<T> {
    /// Type literal, e.g. `String.class`
    Type(T),

    /// String constant
    String(String),

    /// Array initializer, e.g. `{ String.class, int.class }`
    Array(Vec<ElementValue<T>>),

    /// Nested annotation, identified by its annotation type
    Annotation(T),

    /// Any other compile-time constant (numbers, chars, booleans, enum
    /// constants), kept as source text
    Constant(String),

    /// Expression the front-end could not bind to a constant
    Unresolved(String),
}

impl<T> ElementValue<T> {
    /// Kind of this value, for diagnostics.
    pub fn kind(&self) -> ValueKind {
        match self {
            ElementValue::Type(_) => ValueKind::TypeLiteral,
            ElementValue::String(_) => ValueKind::StringLiteral,
            ElementValue::Array(_) => ValueKind::Array,
            ElementValue::Annotation(_) => ValueKind::Annotation,
            ElementValue::Constant(_) => ValueKind::Constant,
            ElementValue::Unresolved(_) => ValueKind::Unresolved,
        }
    }
}

/// Discriminant of [`ElementValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    TypeLiteral,
    StringLiteral,
    Array,
    Annotation,
    Constant,
    Unresolved,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::TypeLiteral => "type literal",
            ValueKind::StringLiteral => "string literal",
            ValueKind::Array => "array",
            ValueKind::Annotation => "annotation",
            ValueKind::Constant => "constant",
            ValueKind::Unresolved => "unresolved expression",
        };
        f.write_str(name)
    }
}

/// A declared `name = value` pair of an annotation instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberValuePair<T> {
    /// Element name as written (`value` for a single unnamed argument)
    pub name: String,

    /// Bound value
    pub value: ElementValue<T>,
}

impl<T> MemberValuePair<T> {
    pub fn new(name: impl Into<String>, value: ElementValue<T>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        let value: ElementValue<()> = ElementValue::Array(vec![ElementValue::Type(())]);
        assert_eq!(value.kind(), ValueKind::Array);
        assert_eq!(
            ElementValue::<()>::Unresolved("NAME".to_string()).kind(),
            ValueKind::Unresolved
        );
    }

    #[test]
    fn test_value_kind_display() {
        assert_eq!(ValueKind::TypeLiteral.to_string(), "type literal");
        assert_eq!(ValueKind::StringLiteral.to_string(), "string literal");
    }
}
