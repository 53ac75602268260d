//! Finds the `@Desc` annotation on a type declaration.

use crate::constants::DESC_CLASS;
use crate::traits::{AnnotationInstance, TypeBinding, TypeDeclarationView};
use log::debug;

/// Return the first annotation on `declaration` whose type is [`DESC_CLASS`].
///
/// Annotations are scanned in declaration order. Should the marker appear more
/// than once, only the first instance is returned.
pub fn locate<D>(declaration: &D) -> Option<&D::Annotation>
where
    D: TypeDeclarationView,
{
    let mut markers = declaration
        .annotations()
        .iter()
        .filter(|annotation| is_marker(*annotation));

    let first = markers.next()?;
    let extra = markers.count();
    if extra > 0 {
        debug!("{} duplicate @Desc annotations ignored", extra);
    }

    Some(first)
}

fn is_marker<A: AnnotationInstance>(annotation: &A) -> bool {
    annotation.annotation_type().binary_name() == Some(DESC_CLASS)
}
