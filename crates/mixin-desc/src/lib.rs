//! # mixin-desc
//!
//! Recovers typed member references from `@Desc` descriptor annotations.
//!
//! A `@Desc` annotation names a member of some class explicitly (owner type,
//! member name, return type, argument types) where the surrounding source
//! cannot express it unambiguously. This crate finds that annotation on a type
//! declaration and decodes it into a [`DescRecord`], which a separate resolver
//! later maps onto a concrete field, method or constructor.
//!
//! The crate is front-end agnostic. A parser and binder supply the AST through
//! three traits:
//!
//! - [`TypeDeclarationView`]: a type declaration and its ordered annotations
//! - [`AnnotationInstance`]: one annotation and its declared element/value pairs
//! - [`TypeBinding`]: an opaque type reference with a binary name
//!
//! ## Pipeline
//!
//! ```text
//! TypeDeclarationView
//!     ↓  locate()   first annotation whose type is DESC_CLASS
//! AnnotationInstance
//!     ↓  decode()   owner / value / ret / args → typed fields
//! DescRecord<T>
//!     ↓
//! external resolver
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mixin_desc::fetch_descriptor;
//!
//! if let Some(record) = fetch_descriptor(&declaration)? {
//!     println!("{:?} -> {:?}", record.name(), record.method_descriptor());
//! }
//! ```

pub mod constants;
pub mod decoder;
pub mod descriptor;
pub mod errors;
pub mod locator;
pub mod record;
pub mod traits;
pub mod value;

pub use constants::DESC_CLASS;
pub use decoder::{decode, DescElement};
pub use descriptor::type_descriptor;
pub use errors::{DescError, DescResult};
pub use locator::locate;
pub use record::DescRecord;
pub use traits::{AnnotationInstance, TypeBinding, TypeDeclarationView};
pub use value::{ElementValue, MemberValuePair, ValueKind};

/// Record type produced for a declaration view `D`.
pub type DeclarationRecord<D> =
    DescRecord<<<D as TypeDeclarationView>::Annotation as AnnotationInstance>::Type>;

/// Locate the `@Desc` annotation on `declaration` and decode it.
///
/// Returns `Ok(None)` when the declaration carries no `@Desc` annotation. A
/// value of the wrong kind inside the annotation is a contract breach of the
/// front-end and is returned as [`DescError`] rather than recovered.
pub fn fetch_descriptor<D>(declaration: &D) -> DescResult<Option<DeclarationRecord<D>>>
where
    D: TypeDeclarationView,
{
    locate(declaration).map(decode).transpose()
}
