//! # koscope
//!
//! Kotlin source introspection and layer architecture verification.
//!
//! Load sources into a [`Codebase`], then query the declaration model:
//!
//! ```no_run
//! use std::path::Path;
//! use koscope::{Codebase, DeclQueries, ModifierProvider, Traversal};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codebase = Codebase::from_directory(Path::new("src/main/kotlin"))?;
//! let scope = codebase.scope();
//!
//! assert!(scope
//!     .classes(Traversal::ALL)
//!     .all(|class| class.is_public_or_default()));
//! # Ok(())
//! # }
//! ```
//!
//! Layer rules live in [`Architecture`]; definitions that close a
//! dependency cycle or reference an undeclared layer never validate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codebase;

pub use codebase::{Codebase, CodebaseError};

pub use koscope_arch::{
    Architecture, ArchitectureBuilder, ArchitectureConfig, ArchitectureError, ConfigError,
    DependencyRules, Layer,
};
pub use koscope_core::{
    kind, Annotation, AnnotationProvider, Decl, DeclId, DeclIteratorExt, DeclKind, DeclQueries,
    DeclTree, Declarations, InternalError, KDoc, KDocProvider, KDocRequirements, KDocTag,
    KDocTagName, LocalDeclarationProvider, Location, Modifier, ModifierProvider, PackageProvider,
    Scope, SyntaxNode, Traversal, UnknownModifier,
};
pub use koscope_kotlin::{KotlinParser, ParseError};
