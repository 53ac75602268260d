//! Decodes a `@Desc` annotation instance into a [`DescRecord`].

use crate::constants::{ARGS_ELEMENT, OWNER_ELEMENT, RET_ELEMENT, VALUE_ELEMENT};
use crate::errors::{DescError, DescResult};
use crate::record::DescRecord;
use crate::traits::{AnnotationInstance, TypeBinding};
use crate::value::{ElementValue, ValueKind};
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The elements of `@Desc` this decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescElement {
    /// `Class<?> owner`
    Owner,
    /// `String value`, the member name
    Value,
    /// `Class<?> ret`
    Ret,
    /// `Class<?>[] args`
    Args,
}

impl DescElement {
    /// Map an element name to a known element; `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            OWNER_ELEMENT => Some(DescElement::Owner),
            VALUE_ELEMENT => Some(DescElement::Value),
            RET_ELEMENT => Some(DescElement::Ret),
            ARGS_ELEMENT => Some(DescElement::Args),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DescElement::Owner => OWNER_ELEMENT,
            DescElement::Value => VALUE_ELEMENT,
            DescElement::Ret => RET_ELEMENT,
            DescElement::Args => ARGS_ELEMENT,
        }
    }
}

impl fmt::Display for DescElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode the declared pairs of `instance` into a [`DescRecord`].
///
/// Only pairs the author wrote are visited; annotation defaults are never
/// consulted, so omitted elements stay `None` or empty. Unknown element names
/// are skipped. A value of the wrong kind fails the whole instance.
pub fn decode<A>(instance: &A) -> DescResult<DescRecord<A::Type>>
where
    A: AnnotationInstance,
{
    let mut owner = None;
    let mut name = None;
    let mut return_type = None;
    let mut argument_types = Vec::new();

    for pair in instance.declared_member_value_pairs() {
        match DescElement::from_name(&pair.name) {
            Some(element @ DescElement::Owner) => {
                owner = Some(expect_type(element, &pair.value)?);
            }
            Some(element @ DescElement::Value) => {
                name = Some(expect_string(element, &pair.value)?);
            }
            Some(element @ DescElement::Ret) => {
                return_type = Some(expect_type(element, &pair.value)?);
            }
            Some(element @ DescElement::Args) => {
                argument_types = expect_type_array(element, &pair.value)?;
            }
            None => trace!("ignoring unknown @Desc element '{}'", pair.name),
        }
    }

    Ok(DescRecord::new(owner, name, return_type, argument_types))
}

fn expect_type<T: TypeBinding>(element: DescElement, value: &ElementValue<T>) -> DescResult<T> {
    match value {
        ElementValue::Type(binding) => Ok(binding.clone()),
        other => Err(malformed(element, ValueKind::TypeLiteral, other)),
    }
}

fn expect_string<T>(element: DescElement, value: &ElementValue<T>) -> DescResult<String> {
    match value {
        ElementValue::String(text) => Ok(text.clone()),
        other => Err(malformed(element, ValueKind::StringLiteral, other)),
    }
}

fn expect_type_array<T: TypeBinding>(
    element: DescElement,
    value: &ElementValue<T>,
) -> DescResult<Vec<T>> {
    match value {
        ElementValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                ElementValue::Type(binding) => Ok(binding.clone()),
                other => Err(DescError::MalformedArrayElement {
                    element,
                    index,
                    expected: ValueKind::TypeLiteral,
                    found: other.kind(),
                }),
            })
            .collect(),
        // Single-element array shorthand: `args = String.class`
        ElementValue::Type(binding) => Ok(vec![binding.clone()]),
        other => Err(malformed(element, ValueKind::Array, other)),
    }
}

fn malformed<T>(element: DescElement, expected: ValueKind, found: &ElementValue<T>) -> DescError {
    DescError::MalformedValue {
        element,
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_from_name() {
        assert_eq!(DescElement::from_name("owner"), Some(DescElement::Owner));
        assert_eq!(DescElement::from_name("value"), Some(DescElement::Value));
        assert_eq!(DescElement::from_name("ret"), Some(DescElement::Ret));
        assert_eq!(DescElement::from_name("args"), Some(DescElement::Args));
        assert_eq!(DescElement::from_name("id"), None);
        assert_eq!(DescElement::from_name("Value"), None);
    }

    #[test]
    fn test_element_name_round_trip() {
        for element in [
            DescElement::Owner,
            DescElement::Value,
            DescElement::Ret,
            DescElement::Args,
        ] {
            assert_eq!(DescElement::from_name(element.name()), Some(element));
        }
    }
}
