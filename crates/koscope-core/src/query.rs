//! Counting and containment combinators.
//!
//! Two layers: [`DeclQueries`] hangs the flag-aware combinators off any
//! declaration root ([`Decl`] or [`Scope`]), and [`DeclIteratorExt`] offers
//! the same name/predicate checks plus kind filters on any declaration
//! iterator, mirroring how downstream rules chain list operations.
//!
//! Empty name sets and empty predicates are vacuously true throughout; that
//! convention is contractual, not an oversight.

use std::collections::HashSet;
use std::iter::Filter;

use crate::decl::Decl;
use crate::scope::{Declarations, Scope, Traversal};

type KindFilter<'t, I> = Filter<I, fn(&Decl<'t>) -> bool>;

/// Flag-aware query combinators over a declaration root.
pub trait DeclQueries<'t> {
    /// The ordered walk for the given traversal flags.
    fn declarations(&self, traversal: Traversal) -> Declarations<'t>;

    /// Number of declarations the walk yields.
    fn num_declarations(&self, traversal: Traversal) -> usize {
        self.declarations(traversal).count()
    }

    /// Number of declarations satisfying `predicate`.
    fn count_declarations<P>(&self, traversal: Traversal, mut predicate: P) -> usize
    where
        P: FnMut(&Decl<'t>) -> bool,
    {
        self.declarations(traversal)
            .filter(|d| predicate(d))
            .count()
    }

    /// Whether the walk yields any declaration at all.
    fn has_declarations(&self, traversal: Traversal) -> bool {
        self.declarations(traversal).next().is_some()
    }

    /// Whether any declaration's name is in `names`; true for an empty set.
    fn has_declaration_with_name(&self, traversal: Traversal, names: &[&str]) -> bool {
        self.declarations(traversal).has_any_with_name(names)
    }

    /// Whether every name in `names` appears among the declarations;
    /// true for an empty set. Presence only, duplicates collapse.
    fn has_all_declarations_with_names(&self, traversal: Traversal, names: &[&str]) -> bool {
        self.declarations(traversal).has_all_names(names)
    }

    /// Whether some declaration satisfies `predicate`.
    fn contains_declaration<P>(&self, traversal: Traversal, predicate: P) -> bool
    where
        P: FnMut(&Decl<'t>) -> bool,
    {
        self.declarations(traversal).any_matching(predicate)
    }

    /// Whether every declaration satisfies `predicate`; vacuously true when
    /// the walk is empty.
    fn has_all_declarations<P>(&self, traversal: Traversal, predicate: P) -> bool
    where
        P: FnMut(&Decl<'t>) -> bool,
    {
        self.declarations(traversal).all_matching(predicate)
    }

    /// Class declarations in the walk.
    fn classes(&self, traversal: Traversal) -> KindFilter<'t, Declarations<'t>> {
        self.declarations(traversal).classes()
    }

    /// Interface declarations in the walk.
    fn interfaces(&self, traversal: Traversal) -> KindFilter<'t, Declarations<'t>> {
        self.declarations(traversal).interfaces()
    }

    /// Object declarations in the walk, companions included.
    fn objects(&self, traversal: Traversal) -> KindFilter<'t, Declarations<'t>> {
        self.declarations(traversal).objects()
    }

    /// Function declarations in the walk.
    fn functions(&self, traversal: Traversal) -> KindFilter<'t, Declarations<'t>> {
        self.declarations(traversal).functions()
    }

    /// Property declarations in the walk.
    fn properties(&self, traversal: Traversal) -> KindFilter<'t, Declarations<'t>> {
        self.declarations(traversal).properties()
    }
}

impl<'t> DeclQueries<'t> for Decl<'t> {
    fn declarations(&self, traversal: Traversal) -> Declarations<'t> {
        self.walk(traversal)
    }
}

impl<'t> DeclQueries<'t> for Scope<'t> {
    fn declarations(&self, traversal: Traversal) -> Declarations<'t> {
        self.walk(traversal)
    }
}

/// Combinators available on any iterator of declarations.
pub trait DeclIteratorExt<'t>: Iterator<Item = Decl<'t>> + Sized {
    /// Keeps class declarations.
    fn classes(self) -> KindFilter<'t, Self> {
        self.filter(|d: &Decl<'t>| d.is_class())
    }

    /// Keeps interface declarations.
    fn interfaces(self) -> KindFilter<'t, Self> {
        self.filter(|d: &Decl<'t>| d.is_interface())
    }

    /// Keeps object declarations, companions included.
    fn objects(self) -> KindFilter<'t, Self> {
        self.filter(|d: &Decl<'t>| d.is_object())
    }

    /// Keeps function declarations.
    fn functions(self) -> KindFilter<'t, Self> {
        self.filter(|d: &Decl<'t>| d.is_function())
    }

    /// Keeps property declarations.
    fn properties(self) -> KindFilter<'t, Self> {
        self.filter(|d: &Decl<'t>| d.is_property())
    }

    /// Keeps constructor declarations.
    fn constructors(self) -> KindFilter<'t, Self> {
        self.filter(|d: &Decl<'t>| d.is_constructor())
    }

    /// Whether any element's name is in `names`; true for an empty set.
    fn has_any_with_name(mut self, names: &[&str]) -> bool {
        if names.is_empty() {
            return true;
        }
        self.any(|d| d.name().is_some_and(|n| names.contains(&n)))
    }

    /// Whether every name in `names` appears among the elements; true for
    /// an empty set.
    fn has_all_names(self, names: &[&str]) -> bool {
        if names.is_empty() {
            return true;
        }
        let found: HashSet<&str> = self.filter_map(Decl::name).collect();
        names.iter().all(|n| found.contains(n))
    }

    /// Whether some element satisfies `predicate`.
    fn any_matching<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Decl<'t>) -> bool,
    {
        self.any(|d| predicate(&d))
    }

    /// Whether every element satisfies `predicate`; vacuously true when the
    /// iterator is empty.
    fn all_matching<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(&Decl<'t>) -> bool,
    {
        self.all(|d| predicate(&d))
    }

    /// Number of elements satisfying `predicate`.
    fn count_matching<P>(self, mut predicate: P) -> usize
    where
        P: FnMut(&Decl<'t>) -> bool,
    {
        self.filter(|d| predicate(d)).count()
    }
}

impl<'t, I: Iterator<Item = Decl<'t>>> DeclIteratorExt<'t> for I {}
