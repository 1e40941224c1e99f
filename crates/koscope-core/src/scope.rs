//! Scope views and the traversal engine.
//!
//! A [`Scope`] is an ordered view over a subset of the declaration tree; it
//! holds a tree reference and a root set, never copies of nodes. Every query
//! re-derives its walk from the immutable tree, so iterators are restartable
//! and two walks with equal flags yield identical sequences.

use crate::decl::{Decl, DeclId, DeclTree};

/// Recursion flags for a declaration walk.
///
/// `include_nested` descends into members of nested types;
/// `include_local` descends into function and accessor bodies.
/// The flags compose independently into four traversal modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Also visit members of nested type declarations.
    pub include_nested: bool,
    /// Also visit declarations local to function and accessor bodies.
    pub include_local: bool,
}

impl Traversal {
    /// Direct members only.
    pub const DIRECT: Self = Self {
        include_nested: false,
        include_local: false,
    };
    /// Direct members plus members of nested types.
    pub const NESTED: Self = Self {
        include_nested: true,
        include_local: false,
    };
    /// Direct members plus local declarations.
    pub const LOCAL: Self = Self {
        include_nested: false,
        include_local: true,
    };
    /// Everything reachable.
    pub const ALL: Self = Self {
        include_nested: true,
        include_local: true,
    };

    /// Creates flags from the two recursion toggles.
    #[must_use]
    pub fn new(include_nested: bool, include_local: bool) -> Self {
        Self {
            include_nested,
            include_local,
        }
    }
}

/// Depth-first, pre-order walk over declarations.
///
/// Lazy and restartable: construction captures only the root set, and each
/// call site gets fresh cursor state.
pub struct Declarations<'t> {
    tree: &'t DeclTree,
    traversal: Traversal,
    stack: Vec<DeclId>,
}

impl<'t> Declarations<'t> {
    pub(crate) fn from_roots(tree: &'t DeclTree, roots: &[DeclId], traversal: Traversal) -> Self {
        let mut stack = Vec::new();
        for &root in roots.iter().rev() {
            push_children(tree, traversal, root, true, &mut stack);
        }
        Self {
            tree,
            traversal,
            stack,
        }
    }
}

/// Pushes `id`'s children onto the walk stack when the flags admit them.
///
/// Local-category children (bodies of callables) require `include_local` at
/// any depth; member-category children are always admitted directly under a
/// root and require `include_nested` below that.
fn push_children(
    tree: &DeclTree,
    traversal: Traversal,
    id: DeclId,
    is_root: bool,
    stack: &mut Vec<DeclId>,
) {
    let admit = if tree.kind_of(id).has_local_children() {
        traversal.include_local
    } else {
        is_root || traversal.include_nested
    };
    if admit {
        for &child in tree.children_of(id).iter().rev() {
            stack.push(child);
        }
    }
}

impl<'t> Iterator for Declarations<'t> {
    type Item = Decl<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        push_children(tree, self.traversal, id, false, &mut self.stack);
        Some(tree.get(id))
    }
}

/// An ordered view over declarations drawn from one or more roots.
#[derive(Debug, Clone)]
pub struct Scope<'t> {
    tree: &'t DeclTree,
    roots: Vec<DeclId>,
}

impl<'t> Scope<'t> {
    pub(crate) fn new(tree: &'t DeclTree, roots: Vec<DeclId>) -> Self {
        Self { tree, roots }
    }

    /// The scope's root declarations, in order.
    pub fn roots(&self) -> impl Iterator<Item = Decl<'t>> + '_ {
        self.roots.iter().map(move |&id| self.tree.get(id))
    }

    /// The file roots contained in this scope.
    pub fn files(&self) -> impl Iterator<Item = Decl<'t>> + '_ {
        self.roots().filter(|d| d.is_file())
    }

    pub(crate) fn walk(&self, traversal: Traversal) -> Declarations<'t> {
        Declarations::from_roots(self.tree, &self.roots, traversal)
    }
}
