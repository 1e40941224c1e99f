//! Architecture definition, validation, and the validated query surface.

use koscope_core::{Decl, PackageProvider};

use crate::error::ArchitectureError;
use crate::graph::find_cycle;
use crate::layer::Layer;

/// A validated layer architecture.
///
/// Instances only exist for definitions that passed validation; the builder
/// rejects unknown layers, self-dependencies, and dependency cycles.
#[derive(Debug, Clone)]
pub struct Architecture {
    layers: Vec<Layer>,
    /// Layer indices ordered most-specific pattern first.
    resolution: Vec<usize>,
    /// Transitive reachability over the declared edges.
    reachable: Vec<Vec<bool>>,
}

impl Architecture {
    /// Starts defining an architecture.
    #[must_use]
    pub fn builder() -> ArchitectureBuilder {
        ArchitectureBuilder {
            layers: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Declared layers, in definition order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Whether `from` may depend on `to`, directly or transitively.
    ///
    /// Irreflexive: a layer never depends on itself. Unknown layers yield
    /// `false`.
    #[must_use]
    pub fn depends_on(&self, from: &Layer, to: &Layer) -> bool {
        match (self.index_of(from.name()), self.index_of(to.name())) {
            (Some(f), Some(t)) => self.reachable[f][t],
            _ => false,
        }
    }

    /// Whether a reference from `from` into `to` is permitted.
    ///
    /// References within one layer are always permitted.
    #[must_use]
    pub fn is_dependency_permitted(&self, from: &Layer, to: &Layer) -> bool {
        from.name() == to.name() || self.depends_on(from, to)
    }

    /// The layer a package resolves to, most specific pattern first.
    #[must_use]
    pub fn layer_of_package(&self, package: &str) -> Option<&Layer> {
        self.resolution
            .iter()
            .map(|&i| &self.layers[i])
            .find(|layer| layer.matches(package))
    }

    /// The layer a declaration resolves to, via its residing package.
    #[must_use]
    pub fn layer_of(&self, decl: &Decl<'_>) -> Option<&Layer> {
        self.layer_of_package(decl.package_name())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name() == name)
    }
}

/// Accumulates layers and dependency edges before validation.
#[derive(Debug)]
pub struct ArchitectureBuilder {
    layers: Vec<Layer>,
    edges: Vec<(String, String)>,
}

impl ArchitectureBuilder {
    /// Declares a layer.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Declares dependency edges through the given callback.
    #[must_use]
    pub fn dependencies<F>(mut self, define: F) -> Self
    where
        F: FnOnce(&mut DependencyRules),
    {
        let mut rules = DependencyRules { edges: Vec::new() };
        define(&mut rules);
        self.edges.extend(rules.edges);
        self
    }

    /// Validates the definition.
    ///
    /// Checks, in order: every edge endpoint is a declared layer, no edge
    /// is a self-dependency, the edge set is acyclic.
    pub fn build(self) -> Result<Architecture, ArchitectureError> {
        let index_of = |name: &str| self.layers.iter().position(|l| l.name() == name);

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.layers.len()];
        for (from, to) in &self.edges {
            let f = index_of(from).ok_or_else(|| ArchitectureError::UnknownLayer {
                name: from.clone(),
            })?;
            let t = index_of(to).ok_or_else(|| ArchitectureError::UnknownLayer {
                name: to.clone(),
            })?;
            if f == t {
                return Err(ArchitectureError::SelfDependency { layer: to.clone() });
            }
            adjacency[f].push(t);
        }

        if let Some(cycle) = find_cycle(self.layers.len(), &adjacency) {
            let chain = cycle
                .iter()
                .map(|&i| self.layers[i].to_string())
                .collect::<Vec<_>>()
                .join(" -->\n");
            return Err(ArchitectureError::CircularDependencies { chain });
        }

        let reachable = transitive_closure(&adjacency);

        let mut resolution: Vec<usize> = (0..self.layers.len()).collect();
        resolution.sort_by(|&a, &b| {
            self.layers[b]
                .specificity()
                .cmp(&self.layers[a].specificity())
        });

        tracing::debug!(
            layers = self.layers.len(),
            edges = self.edges.len(),
            "validated architecture"
        );
        Ok(Architecture {
            layers: self.layers,
            resolution,
            reachable,
        })
    }
}

/// Edge sink handed to the [`ArchitectureBuilder::dependencies`] callback.
#[derive(Debug)]
pub struct DependencyRules {
    edges: Vec<(String, String)>,
}

impl DependencyRules {
    /// Declares that `from` depends on `to`.
    pub fn depends_on(&mut self, from: &Layer, to: &Layer) {
        self.edges
            .push((from.name().to_owned(), to.name().to_owned()));
    }

    pub(crate) fn depends_on_named(&mut self, from: &str, to: &str) {
        self.edges.push((from.to_owned(), to.to_owned()));
    }
}

fn transitive_closure(adjacency: &[Vec<usize>]) -> Vec<Vec<bool>> {
    let n = adjacency.len();
    let mut reachable = vec![vec![false; n]; n];
    for start in 0..n {
        let mut pending: Vec<usize> = adjacency[start].clone();
        while let Some(node) = pending.pop() {
            if !reachable[start][node] {
                reachable[start][node] = true;
                pending.extend_from_slice(&adjacency[node]);
            }
        }
    }
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use koscope_core::{kind, DeclTree, Location, SyntaxNode};

    fn three_layers() -> (Layer, Layer, Layer) {
        (
            Layer::new("presentation", "com.sample.presentation.."),
            Layer::new("application", "com.sample.application.."),
            Layer::new("domain", "com.sample.domain.."),
        )
    }

    #[test]
    fn dependencies_are_transitive_but_irreflexive() {
        let (p, a, d) = three_layers();
        let arch = Architecture::builder()
            .layer(p.clone())
            .layer(a.clone())
            .layer(d.clone())
            .dependencies(|rules| {
                rules.depends_on(&p, &a);
                rules.depends_on(&a, &d);
            })
            .build()
            .unwrap();

        assert!(arch.depends_on(&p, &a));
        assert!(arch.depends_on(&a, &d));
        assert!(arch.depends_on(&p, &d));
        assert!(!arch.depends_on(&d, &p));
        assert!(!arch.depends_on(&a, &a));
    }

    #[test]
    fn same_layer_references_are_always_permitted() {
        let (p, a, _) = three_layers();
        let arch = Architecture::builder()
            .layer(p.clone())
            .layer(a.clone())
            .dependencies(|rules| rules.depends_on(&p, &a))
            .build()
            .unwrap();

        assert!(arch.is_dependency_permitted(&p, &p));
        assert!(arch.is_dependency_permitted(&p, &a));
        assert!(!arch.is_dependency_permitted(&a, &p));
    }

    #[test]
    fn unknown_layer_is_rejected_before_cycles() {
        let (p, a, _) = three_layers();
        let ghost = Layer::new("ghost", "com.sample.ghost..");
        let err = Architecture::builder()
            .layer(p.clone())
            .layer(a.clone())
            .dependencies(|rules| {
                rules.depends_on(&p, &ghost);
                rules.depends_on(&a, &p);
                rules.depends_on(&p, &a);
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, ArchitectureError::UnknownLayer { name } if name == "ghost"));
    }

    #[test]
    fn self_dependency_is_rejected() {
        let (p, _, _) = three_layers();
        let err = Architecture::builder()
            .layer(p.clone())
            .dependencies(|rules| rules.depends_on(&p, &p))
            .build()
            .unwrap_err();
        assert!(
            matches!(err, ArchitectureError::SelfDependency { layer } if layer == "presentation")
        );
    }

    #[test]
    fn two_layer_cycle_reports_the_fixed_message() {
        let layer1 = Layer::new("layer1", "layer1");
        let layer2 = Layer::new("layer2", "layer2");
        let err = Architecture::builder()
            .layer(layer1.clone())
            .layer(layer2.clone())
            .dependencies(|rules| {
                rules.depends_on(&layer1, &layer2);
                rules.depends_on(&layer2, &layer1);
            })
            .build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Illegal circular dependencies:\n\
             Layer(name=layer2, isDefinedBy=layer2) -->\n\
             Layer(name=layer1, isDefinedBy=layer1) -->\n\
             Layer(name=layer2, isDefinedBy=layer2)."
        );
    }

    #[test]
    fn package_resolution_prefers_the_most_specific_pattern() {
        let infra = Layer::new("infra", "com.sample.infra..");
        let db = Layer::new("db", "com.sample.infra.db..");
        let arch = Architecture::builder()
            .layer(infra.clone())
            .layer(db.clone())
            .dependencies(|rules| rules.depends_on(&db, &infra))
            .build()
            .unwrap();

        assert_eq!(arch.layer_of_package("com.sample.infra.http"), Some(&infra));
        assert_eq!(arch.layer_of_package("com.sample.infra.db.pg"), Some(&db));
        assert_eq!(arch.layer_of_package("org.other"), None);
    }

    #[test]
    fn declarations_resolve_through_their_package() {
        let domain = Layer::new("domain", "com.sample.domain..");
        let arch = Architecture::builder()
            .layer(domain.clone())
            .build()
            .unwrap();

        let file = SyntaxNode::new(kind::FILE, Location::new("User.kt", 1, 1))
            .with_child(
                SyntaxNode::new(kind::PACKAGE, Location::new("User.kt", 1, 1))
                    .with_name("com.sample.domain.model"),
            )
            .with_child(
                SyntaxNode::new(kind::CLASS, Location::new("User.kt", 3, 1)).with_name("User"),
            );
        let mut tree = DeclTree::new();
        tree.add_file(&file).unwrap();
        let class = tree.files().next().unwrap().children().next().unwrap();

        assert_eq!(arch.layer_of(&class), Some(&domain));
    }
}
