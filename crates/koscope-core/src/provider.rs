//! Capability traits over declarations.
//!
//! Each provider exposes one facet (annotations, modifiers, documentation,
//! package, local declarations) so rule code can stay generic over where a
//! declaration came from. [`Decl`] implements all of them.

use crate::annotation::Annotation;
use crate::decl::Decl;
use crate::kdoc::{KDoc, KDocRequirements};
use crate::modifier::Modifier;

/// Access to annotation usages on a declaration.
pub trait AnnotationProvider {
    /// Annotations in source order.
    fn annotations(&self) -> &[Annotation];

    /// Number of annotations.
    fn num_annotations(&self) -> usize {
        self.annotations().len()
    }

    /// Whether any annotation matches `query` by simple or fully
    /// qualified name.
    fn has_annotation(&self, query: &str) -> bool {
        self.annotations().iter().any(|a| a.matches(query))
    }

    /// Whether any annotation's fully qualified name equals
    /// `fully_qualified_name`. Simple names never match here; an
    /// annotation written unqualified cannot satisfy this check.
    fn has_annotation_of(&self, fully_qualified_name: &str) -> bool {
        self.annotations()
            .iter()
            .any(|a| a.is_qualified() && a.fully_qualified_name() == fully_qualified_name)
    }

    /// Whether every query in `queries` matches some annotation; true for
    /// an empty set.
    fn has_annotations(&self, queries: &[&str]) -> bool {
        queries.iter().all(|q| self.has_annotation(q))
    }
}

/// Access to modifiers on a declaration.
pub trait ModifierProvider {
    /// Modifiers in source order.
    fn modifiers(&self) -> &[Modifier];

    /// Whether every modifier in `wanted` is present, in any order; true
    /// for an empty set.
    fn has_modifiers(&self, wanted: &[Modifier]) -> bool {
        wanted.iter().all(|m| self.modifiers().contains(m))
    }

    /// Whether the `public` modifier is written explicitly.
    fn has_public_modifier(&self) -> bool {
        self.modifiers().contains(&Modifier::Public)
    }

    /// Whether the `private` modifier is present.
    fn has_private_modifier(&self) -> bool {
        self.modifiers().contains(&Modifier::Private)
    }

    /// Whether the `protected` modifier is present.
    fn has_protected_modifier(&self) -> bool {
        self.modifiers().contains(&Modifier::Protected)
    }

    /// Whether the `internal` modifier is present.
    fn has_internal_modifier(&self) -> bool {
        self.modifiers().contains(&Modifier::Internal)
    }

    /// Whether the declaration is public, explicitly or by default.
    ///
    /// True when no non-public visibility modifier is written.
    fn is_public_or_default(&self) -> bool {
        !self.modifiers().iter().any(|m| {
            matches!(
                m,
                Modifier::Private | Modifier::Protected | Modifier::Internal
            )
        })
    }
}

/// Access to the KDoc block attached to a declaration.
pub trait KDocProvider {
    /// The attached documentation block, if any.
    fn kdoc(&self) -> Option<&KDoc>;

    /// Whether a documentation block is attached at all.
    fn has_kdoc(&self) -> bool {
        self.kdoc().is_some()
    }

    /// Whether an attached block satisfies `requirements`.
    ///
    /// An undocumented declaration fails every requirement set, even an
    /// empty one.
    fn has_valid_kdoc(&self, requirements: &KDocRequirements) -> bool {
        self.kdoc().is_some_and(|doc| doc.satisfies(requirements))
    }
}

/// Access to the package a declaration resides in.
pub trait PackageProvider {
    /// The residing package name; empty for the default package.
    fn package_name(&self) -> &str;

    /// Whether the package name equals `query` exactly.
    fn has_package(&self, query: &str) -> bool {
        self.package_name() == query
    }
}

/// Access to declarations local to a body.
///
/// Only callable declarations (functions, properties with accessors,
/// constructors) carry local declarations; everything else yields none.
pub trait LocalDeclarationProvider<'t> {
    /// Local declarations in source order.
    fn local_declarations(&self) -> Vec<Decl<'t>>;

    /// Number of local declarations.
    fn num_local_declarations(&self) -> usize {
        self.local_declarations().len()
    }

    /// Local function declarations.
    fn local_functions(&self) -> Vec<Decl<'t>> {
        self.local_declarations()
            .into_iter()
            .filter(|d| d.is_function())
            .collect()
    }

    /// Local class declarations.
    fn local_classes(&self) -> Vec<Decl<'t>> {
        self.local_declarations()
            .into_iter()
            .filter(|d| d.is_class())
            .collect()
    }

    /// Local property declarations.
    fn local_properties(&self) -> Vec<Decl<'t>> {
        self.local_declarations()
            .into_iter()
            .filter(|d| d.is_property())
            .collect()
    }

    /// Whether a local function with the given name exists.
    fn contains_local_function(&self, name: &str) -> bool {
        self.local_functions()
            .iter()
            .any(|d| d.name() == Some(name))
    }

    /// Whether a local class with the given name exists.
    fn contains_local_class(&self, name: &str) -> bool {
        self.local_classes().iter().any(|d| d.name() == Some(name))
    }

    /// Whether a local property with the given name exists.
    fn contains_local_property(&self, name: &str) -> bool {
        self.local_properties()
            .iter()
            .any(|d| d.name() == Some(name))
    }
}

impl AnnotationProvider for Decl<'_> {
    fn annotations(&self) -> &[Annotation] {
        self.annotations_internal()
    }
}

impl ModifierProvider for Decl<'_> {
    fn modifiers(&self) -> &[Modifier] {
        self.modifiers_internal()
    }
}

impl KDocProvider for Decl<'_> {
    fn kdoc(&self) -> Option<&KDoc> {
        self.kdoc_internal()
    }
}

impl PackageProvider for Decl<'_> {
    fn package_name(&self) -> &str {
        self.package_name_internal()
    }
}

impl<'t> LocalDeclarationProvider<'t> for Decl<'t> {
    fn local_declarations(&self) -> Vec<Decl<'t>> {
        if self.kind().has_local_children() {
            self.children().collect()
        } else {
            Vec::new()
        }
    }
}
