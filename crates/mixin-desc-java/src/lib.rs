//! # mixin-desc-java
//!
//! Java front-end for mixin-desc - finds `@Desc` annotated type declarations in
//! Java source files and decodes them into [`DescRecord`]s.
//!
//! ## Features
//!
//! - Parse Java source files with tree-sitter
//! - Collect classes, interfaces, enums, records and annotation types,
//!   including member types (`Outer$Inner`)
//! - Bind annotation values: string constants, class literals, arrays
//! - Source-only type binding through imports, the unit's own declarations and
//!   `java.lang`
//! - Sequential or parallel scanning of many files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mixin_desc_java::DescScanner;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = DescScanner::new();
//!
//! let file = scanner.scan_file(Path::new("EntityMixin.java"))?;
//! for found in &file.descriptors {
//!     println!("{} -> {:?}", found.declaration, found.record.method_descriptor());
//! }
//! # Ok(())
//! # }
//! ```

mod binding;
mod config;
mod declaration;
mod errors;
mod extractor;
mod literal;
mod metrics;
mod results;
mod scanner;
mod visitor;

// Re-export core types for convenience
pub use mixin_desc::{
    fetch_descriptor, DescError, DescRecord, ElementValue, TypeBinding, DESC_CLASS,
};

pub use binding::{JavaType, JavaTypeKind};
pub use config::ScanConfig;
pub use declaration::{DeclarationKind, JavaAnnotation, JavaCompilationUnit, JavaTypeDeclaration};
pub use errors::{ScanError, ScanResult};
pub use extractor::{extract_descriptors, parse_compilation_unit};
pub use metrics::ScanMetrics;
pub use results::{DeclarationDescriptor, DeclarationFailure, FileDescriptors, ProjectDescriptors};
pub use scanner::DescScanner;
