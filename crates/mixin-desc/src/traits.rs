use crate::descriptor::type_descriptor;
use crate::value::MemberValuePair;

/// An opaque type reference as seen by the front-end's semantic model.
///
/// The core never creates bindings. It only clones the ones a front-end hands
/// over, so the binding should be a cheap owned value (an interned id, an
/// `Arc`, or a small struct) that stays valid after the AST walk ends.
pub trait TypeBinding: Clone {
    /// Fully-qualified binary name, following the JVM `Class.getName()`
    /// convention (`int`, `java.lang.String`, `a.Outer$Inner`, `[I`).
    ///
    /// `None` when the front-end could not bind the type to a name.
    fn binary_name(&self) -> Option<&str>;

    /// JVM field descriptor of this type (`I`, `Ljava/lang/String;`, `[I`).
    fn descriptor(&self) -> Option<String> {
        self.binary_name().map(type_descriptor)
    }
}

/// One annotation instance attached to a declaration.
pub trait AnnotationInstance {
    /// Binding type used for the annotation type and for type literal values.
    type Type: TypeBinding;

    /// The annotation's own type, used for binary name comparison.
    fn annotation_type(&self) -> &Self::Type;

    /// Element/value pairs the author actually wrote, in source order.
    ///
    /// Elements left at their annotation-declared default are not part of this
    /// list.
    fn declared_member_value_pairs(&self) -> &[MemberValuePair<Self::Type>];
}

/// A semantic view of one type declaration.
pub trait TypeDeclarationView {
    /// Annotation instance type exposed by this front-end.
    type Annotation: AnnotationInstance;

    /// Annotations attached to the declaration, in declaration order.
    fn annotations(&self) -> &[Self::Annotation];
}
