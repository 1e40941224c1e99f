//! # koscope-kotlin
//!
//! Kotlin front-end for koscope, built on Tree-sitter.
//!
//! [`KotlinParser`] turns raw Kotlin source into the declaration-only
//! [`koscope_core::SyntaxNode`] tree that the core crate ingests. Only
//! declaration structure is kept; statements and expressions are discarded
//! during extraction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod parser;

pub use parser::{KotlinParser, ParseError};
