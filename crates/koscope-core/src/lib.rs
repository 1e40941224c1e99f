//! # koscope-core
//!
//! Declaration model and query engine for Kotlin source introspection.
//!
//! This crate consumes syntax trees produced by an external parser (see
//! [`SyntaxNode`]) and builds an immutable, arena-backed declaration model:
//!
//! - [`DeclTree`] owns all declaration nodes for an analysis run
//! - [`Decl`] is a cheap copyable handle into the arena
//! - capability traits ([`AnnotationProvider`], [`ModifierProvider`],
//!   [`KDocProvider`], [`PackageProvider`], [`LocalDeclarationProvider`])
//!   expose cross-cutting lookups per node
//! - [`Scope`] and [`Traversal`] drive filtered, ordered walks over the tree
//! - [`DeclQueries`] and [`DeclIteratorExt`] provide the counting and
//!   containment combinators used by rule assertions
//!
//! ## Example
//!
//! ```ignore
//! use koscope_core::{DeclTree, Traversal, DeclQueries};
//!
//! let mut tree = DeclTree::new();
//! tree.add_file(&file_syntax)?;
//!
//! let scope = tree.scope();
//! assert!(scope.has_declaration_with_name(Traversal::ALL, &["UserRepository"]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotation;
mod decl;
mod error;
mod kdoc;
mod location;
mod modifier;
mod provider;
mod query;
mod scope;
mod syntax;

pub use annotation::Annotation;
pub use decl::{Decl, DeclId, DeclKind, DeclTree};
pub use error::InternalError;
pub use kdoc::{KDoc, KDocRequirements, KDocTag, KDocTagName};
pub use location::Location;
pub use modifier::{Modifier, UnknownModifier};
pub use provider::{
    AnnotationProvider, KDocProvider, LocalDeclarationProvider, ModifierProvider, PackageProvider,
};
pub use query::{DeclIteratorExt, DeclQueries};
pub use scope::{Declarations, Scope, Traversal};
pub use syntax::{kind, SyntaxNode};
