//! AST visitor for extracting Java type declarations and their annotations

use crate::binding::{is_primitive, JavaType, TypeScope};
use crate::declaration::{DeclarationKind, JavaAnnotation, JavaTypeDeclaration};
use crate::literal::string_literal_value;
use mixin_desc::constants::VALUE_ELEMENT;
use mixin_desc::{ElementValue, MemberValuePair};
use std::collections::HashMap;
use tree_sitter::Node;

/// Bound on constant-to-constant references followed while folding.
const MAX_CONSTANT_DEPTH: usize = 16;

/// A declaration seen during the walk, bound once every type in the unit is
/// known.
struct PendingDeclaration<'a> {
    node: Node<'a>,
    path: Vec<String>,
    binary_name: String,
    kind: DeclarationKind,
}

/// A `final String` field whose initializer may fold to a constant.
struct ConstantField<'a> {
    /// Path of the declaring type, outermost first
    owner_path: Vec<String>,
    initializer: Node<'a>,
}

pub struct JavaVisitor<'a> {
    pub source: &'a [u8],
    pub include_nested: bool,
    pub package: Option<String>,
    pub imports: Vec<String>,
    scope: TypeScope,
    pending: Vec<PendingDeclaration<'a>>,
    /// (declaring type binary name, field name) -> field
    constants: HashMap<(String, String), ConstantField<'a>>,
    current_path: Vec<String>,
}

impl<'a> JavaVisitor<'a> {
    pub fn new(source: &'a [u8], include_nested: bool) -> Self {
        Self {
            source,
            include_nested,
            package: None,
            imports: Vec::new(),
            scope: TypeScope::new(None),
            pending: Vec::new(),
            constants: HashMap::new(),
            current_path: Vec::new(),
        }
    }

    fn node_text(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    /// Name text with whitespace and comments between segments removed.
    fn name_text(&self, node: Node) -> String {
        let mut name = String::new();
        self.push_name_tokens(node, &mut name);
        name
    }

    fn push_name_tokens(&self, node: Node, name: &mut String) {
        if is_comment(node) {
            return;
        }
        if node.child_count() == 0 {
            name.push_str(node.utf8_text(self.source).unwrap_or("").trim());
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.push_name_tokens(child, name);
        }
    }

    pub fn visit_node(&mut self, node: Node<'a>) {
        let should_recurse = match node.kind() {
            "package_declaration" => {
                self.visit_package(node);
                false
            }
            "import_declaration" => {
                self.visit_import(node);
                false
            }
            kind => match DeclarationKind::from_node_kind(kind) {
                Some(decl_kind) => {
                    self.visit_declaration(node, decl_kind);
                    false // visit_declaration handles member types itself
                }
                None => true,
            },
        };

        if should_recurse {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                self.visit_node(child);
            }
        }
    }

    fn visit_package(&mut self, node: Node) {
        // package com.example.app;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "scoped_identifier" || child.kind() == "identifier" {
                let package = self.name_text(child);
                self.scope.set_package(package.clone());
                self.package = Some(package);
                break;
            }
        }
    }

    fn visit_import(&mut self, node: Node) {
        // import java.util.List;
        // import java.util.*;
        // import static java.lang.Math.max;
        let mut cursor = node.walk();
        let mut imported = String::new();
        let mut is_wildcard = false;
        let mut is_static = false;

        for child in node.children(&mut cursor) {
            match child.kind() {
                "scoped_identifier" | "identifier" => {
                    imported = self.name_text(child);
                }
                "asterisk" => {
                    is_wildcard = true;
                }
                "static" => {
                    is_static = true;
                }
                _ => {}
            }
        }

        if imported.is_empty() {
            return;
        }

        // static imports bring in members, not types we bind
        if !is_static {
            self.scope.add_import(&imported, is_wildcard);
        }

        let mut written = if is_static {
            format!("static {imported}")
        } else {
            imported
        };
        if is_wildcard {
            written.push_str(".*");
        }
        self.imports.push(written);
    }

    fn visit_declaration(&mut self, node: Node<'a>, kind: DeclarationKind) {
        let Some(name) = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n))
        else {
            return;
        };

        self.current_path.push(name);
        let binary_name = self.scope.declare(&self.current_path);

        // member types are always declared so names resolve, but only
        // collected when asked for
        if self.current_path.len() == 1 || self.include_nested {
            self.pending.push(PendingDeclaration {
                node,
                path: self.current_path.clone(),
                binary_name: binary_name.clone(),
                kind,
            });
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.visit_body(body, &binary_name);
        }

        self.current_path.pop();
    }

    fn visit_body(&mut self, body: Node<'a>, owner: &str) {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                // enum constants come first, members after the `;`
                "enum_body_declarations" => self.visit_body(child, owner),
                "field_declaration" | "constant_declaration" => {
                    self.visit_field(child, owner)
                }
                kind => {
                    if let Some(kind) = DeclarationKind::from_node_kind(kind) {
                        self.visit_declaration(child, kind);
                    }
                }
            }
        }
    }

    /// Record `final String` fields with initializers. Interface fields are
    /// implicitly final.
    fn visit_field(&mut self, node: Node<'a>, owner: &str) {
        let is_final = node.kind() == "constant_declaration" || has_modifier(node, "final");
        let is_string = node
            .child_by_field_name("type")
            .map(|ty| matches!(self.name_text(ty).as_str(), "String" | "java.lang.String"))
            .unwrap_or(false);
        if !is_final || !is_string {
            return;
        }

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let name = declarator.child_by_field_name("name");
            let value = declarator.child_by_field_name("value");
            if let (Some(name), Some(value)) = (name, value) {
                let key = (owner.to_string(), self.node_text(name));
                let field = ConstantField {
                    owner_path: self.current_path.clone(),
                    initializer: value,
                };
                self.constants.insert(key, field);
            }
        }
    }

    /// Bind every collected declaration against the completed scope.
    pub fn finish(self) -> Vec<JavaTypeDeclaration> {
        self.pending
            .iter()
            .map(|pending| self.bind_declaration(pending))
            .collect()
    }

    fn bind_declaration(&self, pending: &PendingDeclaration) -> JavaTypeDeclaration {
        // annotations on a type are in scope of the enclosing type body
        let enclosing = &pending.path[..pending.path.len() - 1];
        let simple_name = pending.path.last().cloned().unwrap_or_default();

        JavaTypeDeclaration {
            binary_name: pending.binary_name.clone(),
            simple_name,
            kind: pending.kind,
            line_start: pending.node.start_position().row + 1,
            line_end: pending.node.end_position().row + 1,
            annotations: self.extract_annotations(pending.node, enclosing),
        }
    }

    fn extract_annotations(&self, node: Node, enclosing: &[String]) -> Vec<JavaAnnotation> {
        let mut annotations = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "modifiers" {
                let mut mod_cursor = child.walk();
                for modifier in child.children(&mut mod_cursor) {
                    if modifier.kind() == "marker_annotation" || modifier.kind() == "annotation" {
                        if let Some(annotation) = self.bind_annotation(modifier, enclosing) {
                            annotations.push(annotation);
                        }
                    }
                }
            }
        }
        annotations
    }

    fn bind_annotation(&self, node: Node, enclosing: &[String]) -> Option<JavaAnnotation> {
        let annotation_type = self.bind_annotation_type(node, enclosing)?;

        let mut pairs = Vec::new();
        if let Some(arguments) = node.child_by_field_name("arguments") {
            let mut cursor = arguments.walk();
            for argument in arguments.named_children(&mut cursor) {
                if is_comment(argument) {
                    continue;
                }
                if argument.kind() == "element_value_pair" {
                    let key = argument.child_by_field_name("key");
                    let value = argument.child_by_field_name("value");
                    if let (Some(key), Some(value)) = (key, value) {
                        pairs.push(MemberValuePair::new(
                            self.node_text(key),
                            self.element_value(value, enclosing),
                        ));
                    }
                } else {
                    // @Desc("name") is shorthand for value = "name"
                    pairs.push(MemberValuePair::new(
                        VALUE_ELEMENT,
                        self.element_value(argument, enclosing),
                    ));
                }
            }
        }

        Some(JavaAnnotation::new(
            annotation_type,
            pairs,
            node.start_position().row + 1,
        ))
    }

    fn bind_annotation_type(&self, node: Node, enclosing: &[String]) -> Option<JavaType> {
        let name = self.name_text(node.child_by_field_name("name")?);
        let binary = self.scope.resolve_class(&name, enclosing);
        Some(JavaType::class(name, binary))
    }

    fn element_value(&self, node: Node, enclosing: &[String]) -> ElementValue<JavaType> {
        match node.kind() {
            "string_literal" => {
                let text = self.node_text(node);
                match string_literal_value(&text) {
                    Some(value) => ElementValue::String(value),
                    None => ElementValue::Unresolved(text),
                }
            }
            "class_literal" => {
                let bound = node
                    .named_child(0)
                    .and_then(|type_node| self.bind_type(type_node, enclosing));
                match bound {
                    Some(ty) => ElementValue::Type(ty),
                    None => ElementValue::Unresolved(self.node_text(node)),
                }
            }
            "element_value_array_initializer" => {
                let mut cursor = node.walk();
                let items = node
                    .named_children(&mut cursor)
                    .filter(|child| !is_comment(*child))
                    .map(|child| self.element_value(child, enclosing))
                    .collect();
                ElementValue::Array(items)
            }
            "marker_annotation" | "annotation" => match self.bind_annotation_type(node, enclosing)
            {
                Some(ty) => ElementValue::Annotation(ty),
                None => ElementValue::Unresolved(self.node_text(node)),
            },
            "parenthesized_expression" | "binary_expression" | "identifier" | "field_access" => {
                match self.fold_string(node, enclosing, 0) {
                    Some(value) => ElementValue::String(value),
                    None => ElementValue::Unresolved(self.node_text(node)),
                }
            }
            kind if is_constant_literal(kind) => ElementValue::Constant(self.node_text(node)),
            _ => ElementValue::Unresolved(self.node_text(node)),
        }
    }

    /// Fold string literals joined with `+`, and references to string
    /// constants declared in this unit, into one constant.
    fn fold_string(&self, node: Node, enclosing: &[String], depth: usize) -> Option<String> {
        match node.kind() {
            "string_literal" => string_literal_value(&self.node_text(node)),
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .find(|child| !is_comment(*child))?;
                self.fold_string(inner, enclosing, depth)
            }
            "binary_expression" => {
                let operator = node.child_by_field_name("operator")?;
                if self.node_text(operator) != "+" {
                    return None;
                }
                let left = node.child_by_field_name("left")?;
                let right = node.child_by_field_name("right")?;
                let left = self.fold_string(left, enclosing, depth)?;
                let right = self.fold_string(right, enclosing, depth)?;
                Some(left + &right)
            }
            "identifier" => {
                // a simple name is a field of an enclosing type, innermost first
                let field = self.node_text(node);
                (1..=enclosing.len()).rev().find_map(|len| {
                    let owner = self.scope.declared_binary(&enclosing[..len])?;
                    self.fold_constant(owner, &field, depth)
                })
            }
            "field_access" => {
                let object = self.name_text(node.child_by_field_name("object")?);
                let field = self.node_text(node.child_by_field_name("field")?);
                let owner = self.scope.resolve_class(&object, enclosing);
                self.fold_constant(&owner, &field, depth)
            }
            _ => None,
        }
    }

    fn fold_constant(&self, owner: &str, field: &str, depth: usize) -> Option<String> {
        if depth >= MAX_CONSTANT_DEPTH {
            return None;
        }
        let constant = self.constants.get(&(owner.to_string(), field.to_string()))?;
        // the initializer sees the declaring type's members
        self.fold_string(constant.initializer, &constant.owner_path, depth + 1)
    }

    fn bind_type(&self, node: Node, enclosing: &[String]) -> Option<JavaType> {
        match node.kind() {
            "void_type" | "integral_type" | "floating_point_type" | "boolean_type" => {
                Some(JavaType::primitive(self.name_text(node)))
            }
            "type_identifier" | "scoped_type_identifier" => {
                let name = self.name_text(node);
                if is_primitive(&name) {
                    return Some(JavaType::primitive(name));
                }
                let binary = self.scope.resolve_class(&name, enclosing);
                Some(JavaType::class(name, binary))
            }
            "generic_type" => {
                // List<String>.class is not legal Java, but bind the raw type
                let mut cursor = node.walk();
                let raw = node.named_children(&mut cursor).find(|child| {
                    child.kind() == "type_identifier" || child.kind() == "scoped_type_identifier"
                })?;
                self.bind_type(raw, enclosing)
            }
            "array_type" => {
                let element = self.bind_type(node.child_by_field_name("element")?, enclosing)?;
                let dimensions = node
                    .child_by_field_name("dimensions")
                    .map(|dims| self.node_text(dims).matches('[').count())
                    .unwrap_or(1);
                Some(JavaType::array(element, dimensions))
            }
            _ => None,
        }
    }
}

fn has_modifier(node: Node, modifier: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.kind() == "modifiers")
        .any(|modifiers| {
            let mut mod_cursor = modifiers.walk();
            let found = modifiers
                .children(&mut mod_cursor)
                .any(|m| m.kind() == modifier);
            found
        });
    found
}

fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn is_constant_literal(kind: &str) -> bool {
    matches!(
        kind,
        "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "character_literal"
            | "true"
            | "false"
            | "null_literal"
    )
}
