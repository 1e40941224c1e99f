//! # koscope-arch
//!
//! Layer architecture definitions and verification.
//!
//! Layers name slices of the codebase by package pattern; the
//! [`Architecture`] builder validates the declared dependency edges
//! (unknown layers, self-dependencies, cycles) before any query runs.
//! Definitions can also be loaded from TOML via [`ArchitectureConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod architecture;
mod config;
mod error;
mod graph;
mod layer;

pub use architecture::{Architecture, ArchitectureBuilder, DependencyRules};
pub use config::{ArchitectureConfig, ConfigError};
pub use error::ArchitectureError;
pub use layer::Layer;
