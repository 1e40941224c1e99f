//! TOML layer definitions.
//!
//! Declarative alternative to the builder: `[[layers]]` entries carry a
//! `name` and a `defined-by` package pattern, and the `[dependencies]`
//! table maps each layer to the layers it may depend on. Loading goes
//! through the same validating build as the programmatic path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::architecture::Architecture;
use crate::error::ArchitectureError;
use crate::layer::Layer;

/// Errors when loading a layer definition file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The definition file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The TOML could not be parsed.
    #[error("invalid layer definition: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// The definition parsed but failed architecture validation.
    #[error(transparent)]
    Architecture(#[from] ArchitectureError),
}

/// Parsed layer definitions, not yet validated.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchitectureConfig {
    /// Layer declarations in file order.
    #[serde(rename = "layers", default)]
    layers: Vec<LayerDef>,

    /// Layer name to the names it may depend on.
    #[serde(default)]
    dependencies: HashMap<String, Vec<String>>,
}

/// One `[[layers]]` entry.
#[derive(Debug, Clone, Deserialize)]
struct LayerDef {
    name: String,
    #[serde(rename = "defined-by")]
    defined_by: String,
}

impl ArchitectureConfig {
    /// Loads layer definitions from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses layer definitions from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validates the definitions into an [`Architecture`].
    ///
    /// Edges are fed in layer declaration order so diagnostics are
    /// deterministic regardless of table order. A `[dependencies]` key
    /// naming an undeclared layer is rejected as unknown.
    pub fn into_architecture(self) -> Result<Architecture, ConfigError> {
        let mut builder = Architecture::builder();
        for def in &self.layers {
            builder = builder.layer(Layer::new(&def.name, &def.defined_by));
        }

        for key in self.dependencies.keys() {
            if !self.layers.iter().any(|l| &l.name == key) {
                return Err(ArchitectureError::UnknownLayer { name: key.clone() }.into());
            }
        }

        let dependencies = &self.dependencies;
        let layers = &self.layers;
        builder = builder.dependencies(|rules| {
            for def in layers {
                if let Some(targets) = dependencies.get(&def.name) {
                    for target in targets {
                        rules.depends_on_named(&def.name, target);
                    }
                }
            }
        });

        Ok(builder.build()?)
    }
}
