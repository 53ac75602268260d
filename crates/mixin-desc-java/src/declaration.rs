//! Java implementations of the mixin-desc AST views

use crate::binding::JavaType;
use mixin_desc::{AnnotationInstance, MemberValuePair, TypeDeclarationView};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An annotation on a Java type declaration, with its values bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaAnnotation {
    annotation_type: JavaType,
    pairs: Vec<MemberValuePair<JavaType>>,
    /// Line of the `@` (1-indexed)
    line: usize,
}

impl JavaAnnotation {
    pub fn new(
        annotation_type: JavaType,
        pairs: Vec<MemberValuePair<JavaType>>,
        line: usize,
    ) -> Self {
        Self {
            annotation_type,
            pairs,
            line,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl AnnotationInstance for JavaAnnotation {
    type Type = JavaType;

    fn annotation_type(&self) -> &JavaType {
        &self.annotation_type
    }

    fn declared_member_value_pairs(&self) -> &[MemberValuePair<JavaType>] {
        &self.pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl DeclarationKind {
    /// Map a tree-sitter node kind to a declaration kind.
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(DeclarationKind::Class),
            "interface_declaration" => Some(DeclarationKind::Interface),
            "enum_declaration" => Some(DeclarationKind::Enum),
            "record_declaration" => Some(DeclarationKind::Record),
            "annotation_type_declaration" => Some(DeclarationKind::Annotation),
            _ => None,
        }
    }
}

/// A class, interface, enum, record or annotation type declared in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaTypeDeclaration {
    /// Binary name, e.g. `com.example.Outer$Inner`
    pub binary_name: String,

    pub simple_name: String,

    pub kind: DeclarationKind,

    /// Starting line number (1-indexed)
    pub line_start: usize,

    /// Ending line number (1-indexed)
    pub line_end: usize,

    /// Annotations in declaration order
    pub annotations: Vec<JavaAnnotation>,
}

impl JavaTypeDeclaration {
    /// Whether this declaration is nested inside another type.
    pub fn is_nested(&self) -> bool {
        let simple = self.binary_name.rsplit('.').next().unwrap_or("");
        simple.contains('$')
    }
}

impl TypeDeclarationView for JavaTypeDeclaration {
    type Annotation = JavaAnnotation;

    fn annotations(&self) -> &[JavaAnnotation] {
        &self.annotations
    }
}

/// Everything extracted from one `.java` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaCompilationUnit {
    pub file_path: PathBuf,

    pub package: Option<String>,

    /// Imported names as written (wildcards end in `.*`)
    pub imports: Vec<String>,

    /// Type declarations in source order, outer before nested
    pub declarations: Vec<JavaTypeDeclaration>,

    pub line_count: usize,
}

impl JavaCompilationUnit {
    pub fn new(file_path: &Path) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
            package: None,
            imports: Vec::new(),
            declarations: Vec::new(),
            line_count: 0,
        }
    }

    /// Find a declaration by binary name.
    pub fn find(&self, binary_name: &str) -> Option<&JavaTypeDeclaration> {
        self.declarations
            .iter()
            .find(|decl| decl.binary_name == binary_name)
    }
}
