//! JVM descriptor rendering for decoded records.

use crate::record::DescRecord;
use crate::traits::TypeBinding;

/// JVM field descriptor for a binary name.
///
/// Primitives map to their one-letter codes, array names (already in `[`
/// form) get slashes, and everything else becomes `L<internal name>;`.
pub fn type_descriptor(binary_name: &str) -> String {
    let primitive = match binary_name {
        "void" => "V",
        "boolean" => "Z",
        "byte" => "B",
        "char" => "C",
        "short" => "S",
        "int" => "I",
        "long" => "J",
        "float" => "F",
        "double" => "D",
        name if name.starts_with('[') => return internal_name(name),
        name => return format!("L{};", internal_name(name)),
    };
    primitive.to_string()
}

/// Internal (slash-separated) form of a binary name.
pub fn internal_name(binary_name: &str) -> String {
    binary_name.replace('.', "/")
}

impl<T: TypeBinding> DescRecord<T> {
    /// Method descriptor `(args)ret` described by this record.
    ///
    /// An absent return type renders as `V`, matching the annotation's own
    /// `void.class` default. Returns `None` if any referenced type has no
    /// binary name.
    pub fn method_descriptor(&self) -> Option<String> {
        let mut descriptor = String::from("(");
        for argument in self.argument_types() {
            descriptor.push_str(&argument.descriptor()?);
        }
        descriptor.push(')');
        match self.return_type() {
            Some(ret) => descriptor.push_str(&ret.descriptor()?),
            None => descriptor.push('V'),
        }
        Some(descriptor)
    }

    /// Internal name of the explicit owner, e.g. `net/minecraft/Entity`.
    pub fn owner_internal_name(&self) -> Option<String> {
        self.owner()
            .and_then(|owner| owner.binary_name())
            .map(internal_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_descriptors() {
        assert_eq!(type_descriptor("int"), "I");
        assert_eq!(type_descriptor("long"), "J");
        assert_eq!(type_descriptor("boolean"), "Z");
        assert_eq!(type_descriptor("void"), "V");
    }

    #[test]
    fn test_class_descriptor() {
        assert_eq!(type_descriptor("java.lang.String"), "Ljava/lang/String;");
        assert_eq!(
            type_descriptor("com.example.Outer$Inner"),
            "Lcom/example/Outer$Inner;"
        );
    }

    #[test]
    fn test_array_descriptor() {
        assert_eq!(type_descriptor("[I"), "[I");
        assert_eq!(type_descriptor("[[Ljava.lang.String;"), "[[Ljava/lang/String;");
    }
}
