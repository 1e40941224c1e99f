//! Architecture layers and package matching.

use std::fmt;

/// A named architecture layer defined by a package pattern.
///
/// A pattern ending in `..` matches the prefix package and every
/// subpackage below it; any other pattern matches exactly one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    defined_by: String,
}

impl Layer {
    /// Creates a layer from its name and defining package pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, defined_by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defined_by: defined_by.into(),
        }
    }

    /// The layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The defining package pattern, as given.
    #[must_use]
    pub fn defined_by(&self) -> &str {
        &self.defined_by
    }

    /// Whether `package` falls inside this layer.
    #[must_use]
    pub fn matches(&self, package: &str) -> bool {
        if let Some(prefix) = self.defined_by.strip_suffix("..") {
            package == prefix || package.starts_with(&format!("{prefix}."))
        } else {
            package == self.defined_by
        }
    }

    /// Pattern length used to rank layers for longest-prefix resolution.
    pub(crate) fn specificity(&self) -> usize {
        self.defined_by.trim_end_matches('.').len()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer(name={}, isDefinedBy={})", self.name, self.defined_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subpackage_pattern_matches_prefix_and_below() {
        let layer = Layer::new("domain", "com.example.domain..");
        assert!(layer.matches("com.example.domain"));
        assert!(layer.matches("com.example.domain.model"));
        assert!(layer.matches("com.example.domain.model.user"));
        assert!(!layer.matches("com.example.domains"));
        assert!(!layer.matches("com.example"));
    }

    #[test]
    fn plain_pattern_matches_exactly() {
        let layer = Layer::new("app", "com.example.app");
        assert!(layer.matches("com.example.app"));
        assert!(!layer.matches("com.example.app.internal"));
    }

    #[test]
    fn display_uses_the_fixed_format() {
        let layer = Layer::new("layer2", "layer2");
        assert_eq!(layer.to_string(), "Layer(name=layer2, isDefinedBy=layer2)");
    }
}
