//! Source-level type binding for Java
//!
//! There is no classpath here: names are bound using only what one compilation
//! unit declares and imports, plus the common `java.lang` types.

use log::debug;
use mixin_desc::{type_descriptor, TypeBinding, DESC_CLASS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `java.lang` types visible without an import.
const JAVA_LANG: &[&str] = &[
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassLoader",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalArgumentException",
    "IllegalStateException",
    "Integer",
    "Iterable",
    "Long",
    "Math",
    "Number",
    "Object",
    "Override",
    "Record",
    "Runnable",
    "RuntimeException",
    "SafeVarargs",
    "Short",
    "String",
    "StringBuilder",
    "SuppressWarnings",
    "System",
    "Thread",
    "Throwable",
    "Void",
];

/// Binary names recognized when they arrive through an on-demand import.
const KNOWN_TYPES: &[&str] = &[DESC_CLASS];

const PRIMITIVES: &[&str] = &[
    "void", "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JavaTypeKind {
    Primitive,
    Class,
    Array { dimensions: usize },
}

/// A Java type bound from source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JavaType {
    /// The type as written, e.g. `Outer.Inner` or `String[]`
    source_name: String,

    /// `Class.getName()` style binary name, e.g. `a.Outer$Inner` or `[Ljava.lang.String;`
    binary_name: String,

    kind: JavaTypeKind,
}

impl JavaType {
    pub fn primitive(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            source_name: name.clone(),
            binary_name: name,
            kind: JavaTypeKind::Primitive,
        }
    }

    pub fn class(source_name: impl Into<String>, binary_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            binary_name: binary_name.into(),
            kind: JavaTypeKind::Class,
        }
    }

    /// Array of `element` with `dimensions` additional dimensions.
    pub fn array(element: JavaType, dimensions: usize) -> Self {
        let (component, inner_dimensions) = match element.kind {
            JavaTypeKind::Primitive => (type_descriptor(&element.binary_name), 0),
            JavaTypeKind::Class => (format!("L{};", element.binary_name), 0),
            JavaTypeKind::Array { dimensions } => (element.binary_name.clone(), dimensions),
        };

        Self {
            source_name: format!("{}{}", element.source_name, "[]".repeat(dimensions)),
            binary_name: format!("{}{}", "[".repeat(dimensions), component),
            kind: JavaTypeKind::Array {
                dimensions: dimensions + inner_dimensions,
            },
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn kind(&self) -> JavaTypeKind {
        self.kind
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == JavaTypeKind::Primitive
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, JavaTypeKind::Array { .. })
    }
}

impl TypeBinding for JavaType {
    fn binary_name(&self) -> Option<&str> {
        Some(&self.binary_name)
    }
}

/// Whether `name` is a primitive type keyword (including `void`).
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

/// Names visible in one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct TypeScope {
    package: Option<String>,
    /// simple name -> imported qualified name
    single_imports: HashMap<String, String>,
    on_demand_imports: Vec<String>,
    /// dotted source path (`Outer.Inner`) -> binary name
    declared: HashMap<String, String>,
}

impl TypeScope {
    pub fn new(package: Option<String>) -> Self {
        Self {
            package,
            ..Default::default()
        }
    }

    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(package.into());
    }

    /// Record a type import. `imported` is the name before any `.*`.
    pub fn add_import(&mut self, imported: &str, is_wildcard: bool) {
        if is_wildcard {
            self.on_demand_imports.push(imported.to_string());
            return;
        }
        if let Some(simple) = imported.rsplit('.').next() {
            self.single_imports
                .insert(simple.to_string(), imported.to_string());
        }
    }

    /// Register a declared type by its path of simple names and return its
    /// binary name.
    pub fn declare(&mut self, path: &[String]) -> String {
        let binary = match self.package.as_deref() {
            Some(pkg) => format!("{}.{}", pkg, path.join("$")),
            None => path.join("$"),
        };
        self.declared.insert(path.join("."), binary.clone());
        binary
    }

    /// Binary name of a type declared in this unit, by its path of simple names.
    pub fn declared_binary(&self, path: &[String]) -> Option<&str> {
        self.declared.get(&path.join(".")).map(String::as_str)
    }

    /// Bind a (possibly qualified) class name as seen from inside the types
    /// named by `enclosing`, outermost first.
    pub fn resolve_class(&self, name: &str, enclosing: &[String]) -> String {
        let segments: Vec<&str> = name
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let Some((first, rest)) = segments.split_first() else {
            return name.to_string();
        };

        for depth in (1..=enclosing.len()).rev() {
            let member = format!("{}.{}", enclosing[..depth].join("."), first);
            if let Some(binary) = self.declared.get(&member) {
                return nest(binary, rest);
            }
        }

        if let Some(binary) = self.declared.get(*first) {
            return nest(binary, rest);
        }

        if let Some(qualified) = self.single_imports.get(*first) {
            return nest(&qualified_to_binary(qualified), rest);
        }

        if JAVA_LANG.contains(first) {
            return nest(&format!("java.lang.{first}"), rest);
        }

        if !rest.is_empty() && first.starts_with(|c: char| c.is_lowercase()) {
            return qualified_to_binary(&segments.join("."));
        }

        if let Some(binary) = self.resolve_on_demand(first) {
            return nest(&binary, rest);
        }

        let base = match self.package.as_deref() {
            Some(pkg) => format!("{pkg}.{first}"),
            None => first.to_string(),
        };
        nest(&base, rest)
    }

    /// Bind a simple name through the on-demand imports. A known binary name
    /// wins; otherwise only a lone on-demand import is trusted.
    fn resolve_on_demand(&self, simple: &str) -> Option<String> {
        let candidates: Vec<String> = self
            .on_demand_imports
            .iter()
            .map(|imported| qualified_to_binary(&format!("{imported}.{simple}")))
            .collect();

        if let Some(known) = candidates
            .iter()
            .find(|candidate| KNOWN_TYPES.contains(&candidate.as_str()))
        {
            return Some(known.clone());
        }

        match candidates.as_slice() {
            [] => None,
            [only] => {
                debug!("binding '{}' through on-demand import as {}", simple, only);
                Some(only.clone())
            }
            _ => {
                debug!(
                    "'{}' is ambiguous across {} on-demand imports; binding to the current package",
                    simple,
                    candidates.len()
                );
                None
            }
        }
    }
}

fn nest(binary: &str, members: &[&str]) -> String {
    let mut name = binary.to_string();
    for member in members {
        name.push('$');
        name.push_str(member);
    }
    name
}

/// Split a dotted qualified name into package and nested type parts, using
/// the convention that type names start with an upper-case letter.
pub fn qualified_to_binary(qualified: &str) -> String {
    let segments: Vec<&str> = qualified.split('.').collect();
    let Some(first_type) = segments
        .iter()
        .position(|s| s.starts_with(|c: char| c.is_uppercase()))
    else {
        return qualified.to_string();
    };

    let types = segments[first_type..].join("$");
    if first_type == 0 {
        types
    } else {
        format!("{}.{}", segments[..first_type].join("."), types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primitive_binding() {
        let ty = JavaType::primitive("int");
        assert!(ty.is_primitive());
        assert_eq!(ty.binary_name(), Some("int"));
        assert_eq!(ty.descriptor().as_deref(), Some("I"));
    }

    #[test]
    fn test_array_binding() {
        let string = JavaType::class("String", "java.lang.String");
        let array = JavaType::array(string, 2);
        assert_eq!(array.binary_name(), Some("[[Ljava.lang.String;"));
        assert_eq!(array.source_name(), "String[][]");
        assert_eq!(array.kind(), JavaTypeKind::Array { dimensions: 2 });
        assert_eq!(array.descriptor().as_deref(), Some("[[Ljava/lang/String;"));

        let ints = JavaType::array(JavaType::primitive("int"), 1);
        assert_eq!(ints.binary_name(), Some("[I"));

        let nested = JavaType::array(ints, 1);
        assert_eq!(nested.binary_name(), Some("[[I"));
        assert_eq!(nested.kind(), JavaTypeKind::Array { dimensions: 2 });
    }

    #[test]
    fn test_qualified_to_binary() {
        assert_eq!(qualified_to_binary("java.util.Map"), "java.util.Map");
        assert_eq!(qualified_to_binary("java.util.Map.Entry"), "java.util.Map$Entry");
        assert_eq!(qualified_to_binary("Outer.Inner"), "Outer$Inner");
        assert_eq!(qualified_to_binary("com.example"), "com.example");
    }

    #[test]
    fn test_resolve_import() {
        let mut scope = TypeScope::new(Some("com.example".to_string()));
        scope.add_import("net.minecraft.entity.Entity", false);
        assert_eq!(
            scope.resolve_class("Entity", &[]),
            "net.minecraft.entity.Entity"
        );
    }

    #[test]
    fn test_resolve_java_lang() {
        let scope = TypeScope::new(Some("com.example".to_string()));
        assert_eq!(scope.resolve_class("String", &[]), "java.lang.String");
        assert_eq!(scope.resolve_class("Object", &[]), "java.lang.Object");
    }

    #[test]
    fn test_resolve_fully_qualified() {
        let scope = TypeScope::new(Some("com.example".to_string()));
        assert_eq!(
            scope.resolve_class("java.util.Map.Entry", &[]),
            "java.util.Map$Entry"
        );
    }

    #[test]
    fn test_resolve_same_package() {
        let scope = TypeScope::new(Some("com.example".to_string()));
        assert_eq!(scope.resolve_class("Helper", &[]), "com.example.Helper");

        let default_package = TypeScope::new(None);
        assert_eq!(default_package.resolve_class("Helper", &[]), "Helper");
    }

    #[test]
    fn test_resolve_declared_and_nested() {
        let mut scope = TypeScope::new(Some("a".to_string()));
        assert_eq!(scope.declare(&path(&["Outer"])), "a.Outer");
        assert_eq!(scope.declare(&path(&["Outer", "Inner"])), "a.Outer$Inner");

        // qualified from anywhere
        assert_eq!(scope.resolve_class("Outer.Inner", &[]), "a.Outer$Inner");
        // simple name from inside Outer
        assert_eq!(
            scope.resolve_class("Inner", &path(&["Outer"])),
            "a.Outer$Inner"
        );
        // simple name from outside falls back to the package
        assert_eq!(scope.resolve_class("Inner", &[]), "a.Inner");
    }

    #[test]
    fn test_declared_binary() {
        let mut scope = TypeScope::new(Some("a".to_string()));
        scope.declare(&path(&["Outer", "Inner"]));
        assert_eq!(
            scope.declared_binary(&path(&["Outer", "Inner"])),
            Some("a.Outer$Inner")
        );
        assert_eq!(scope.declared_binary(&path(&["Inner"])), None);
    }

    #[test]
    fn test_import_nested_type() {
        let mut scope = TypeScope::new(None);
        scope.add_import("java.util.Map", false);
        assert_eq!(scope.resolve_class("Map.Entry", &[]), "java.util.Map$Entry");
    }

    #[test]
    fn test_single_wildcard_import_binds() {
        let mut scope = TypeScope::new(Some("p".to_string()));
        scope.add_import("java.util", true);
        assert_eq!(scope.resolve_class("List", &[]), "java.util.List");
        assert_eq!(scope.resolve_class("Map.Entry", &[]), "java.util.Map$Entry");
    }

    #[test]
    fn test_wildcard_import_of_member_types() {
        let mut scope = TypeScope::new(Some("p".to_string()));
        scope.add_import("net.minecraft.entity.Entity", true);
        assert_eq!(
            scope.resolve_class("Removal", &[]),
            "net.minecraft.entity.Entity$Removal"
        );
    }

    #[test]
    fn test_ambiguous_wildcard_imports_fall_back_to_package() {
        let mut scope = TypeScope::new(Some("p".to_string()));
        scope.add_import("java.util", true);
        scope.add_import("java.io", true);
        assert_eq!(scope.resolve_class("List", &[]), "p.List");
    }

    #[test]
    fn test_wildcard_desc_import_among_others() {
        let mut scope = TypeScope::new(Some("p".to_string()));
        scope.add_import("org.spongepowered.asm.mixin", true);
        scope.add_import("org.spongepowered.asm.mixin.injection", true);
        scope.add_import("java.util", true);
        assert_eq!(scope.resolve_class("Desc", &[]), DESC_CLASS);
    }

    #[test]
    fn test_explicit_names_beat_wildcard_imports() {
        let mut scope = TypeScope::new(Some("p".to_string()));
        scope.add_import("a", true);
        scope.add_import("b.Thing", false);
        scope.declare(&path(&["Local"]));
        assert_eq!(scope.resolve_class("Thing", &[]), "b.Thing");
        assert_eq!(scope.resolve_class("Local", &[]), "p.Local");
        assert_eq!(scope.resolve_class("String", &[]), "java.lang.String");
    }

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive("void"));
        assert!(is_primitive("double"));
        assert!(!is_primitive("String"));
    }
}
