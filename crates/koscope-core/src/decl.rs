//! The declaration arena.
//!
//! [`DeclTree`] owns every declaration node produced from the external parse
//! trees of one analysis run. Nodes are immutable after ingestion; parents
//! are plain arena indices, so upward queries (package derivation, top-level
//! checks, fully qualified names) never create ownership cycles.

use serde::Serialize;
use tracing::debug;

use crate::annotation::Annotation;
use crate::error::InternalError;
use crate::kdoc::KDoc;
use crate::location::Location;
use crate::modifier::Modifier;
use crate::scope::{Declarations, Scope, Traversal};
use crate::syntax::{kind, SyntaxNode};

/// Kind of a declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DeclKind {
    File,
    Package,
    Class,
    Interface,
    Object,
    CompanionObject,
    Function,
    Property,
    PrimaryConstructor,
    SecondaryConstructor,
    Parameter,
}

impl DeclKind {
    fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            kind::CLASS => Self::Class,
            kind::INTERFACE => Self::Interface,
            kind::OBJECT => Self::Object,
            kind::COMPANION_OBJECT => Self::CompanionObject,
            kind::FUNCTION => Self::Function,
            kind::PROPERTY => Self::Property,
            kind::PRIMARY_CONSTRUCTOR => Self::PrimaryConstructor,
            kind::SECONDARY_CONSTRUCTOR => Self::SecondaryConstructor,
            kind::PARAMETER => Self::Parameter,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether children of a node of this kind are local declarations
    /// (declared inside a body) rather than nested members.
    pub(crate) fn has_local_children(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Property | Self::PrimaryConstructor | Self::SecondaryConstructor
        )
    }
}

/// Index of a node inside its [`DeclTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(usize);

#[derive(Debug)]
struct DeclNode {
    kind: DeclKind,
    name: Option<String>,
    text: String,
    location: Location,
    package: String,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
    kdoc: Option<KDoc>,
    parent: Option<DeclId>,
    children: Vec<DeclId>,
    /// Package header node; only set on `File` nodes.
    package_decl: Option<DeclId>,
}

/// Arena of declaration nodes for one analysis run.
///
/// Built once from external [`SyntaxNode`] trees, read-only afterwards.
#[derive(Debug, Default)]
pub struct DeclTree {
    nodes: Vec<DeclNode>,
    files: Vec<DeclId>,
}

impl DeclTree {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one file syntax tree, single pass, preserving source order.
    ///
    /// # Errors
    ///
    /// Returns [`InternalError`] when the root is not a file node, when a
    /// nested node carries an unexpected kind tag, or when a modifier or
    /// annotation token cannot be interpreted.
    pub fn add_file(&mut self, file: &SyntaxNode) -> Result<DeclId, InternalError> {
        if file.kind() != kind::FILE {
            return Err(InternalError::new(
                format!("expected a file root, got '{}'", file.kind()),
                file,
            ));
        }

        let package = file
            .children()
            .iter()
            .find(|c| c.kind() == kind::PACKAGE)
            .and_then(SyntaxNode::name)
            .unwrap_or_default()
            .to_owned();

        let file_id = self.push(DeclNode {
            kind: DeclKind::File,
            name: file.name().map(ToOwned::to_owned),
            text: file.text().to_owned(),
            location: file.location().clone(),
            package: package.clone(),
            annotations: parse_annotations(file)?,
            modifiers: parse_modifiers(file)?,
            kdoc: file.doc().map(KDoc::parse),
            parent: None,
            children: Vec::new(),
            package_decl: None,
        });

        for child in file.children() {
            if child.kind() == kind::PACKAGE {
                if self.nodes[file_id.0].package_decl.is_some() {
                    return Err(InternalError::new("duplicate package header", child));
                }
                let pkg_id = self.push(DeclNode {
                    kind: DeclKind::Package,
                    name: child.name().map(ToOwned::to_owned),
                    text: child.text().to_owned(),
                    location: child.location().clone(),
                    package: package.clone(),
                    annotations: Vec::new(),
                    modifiers: Vec::new(),
                    kdoc: None,
                    parent: Some(file_id),
                    children: Vec::new(),
                    package_decl: None,
                });
                self.nodes[file_id.0].package_decl = Some(pkg_id);
            } else {
                let child_id = self.build(child, file_id, &package)?;
                self.nodes[file_id.0].children.push(child_id);
            }
        }

        self.files.push(file_id);
        debug!(
            file = %file.location().file.display(),
            nodes = self.nodes.len(),
            "ingested file"
        );
        Ok(file_id)
    }

    fn build(
        &mut self,
        node: &SyntaxNode,
        parent: DeclId,
        package: &str,
    ) -> Result<DeclId, InternalError> {
        let Some(decl_kind) = DeclKind::from_tag(node.kind()) else {
            return Err(InternalError::new(
                format!("unexpected node kind '{}'", node.kind()),
                node,
            ));
        };

        let mut name = node.name().map(ToOwned::to_owned);
        if decl_kind == DeclKind::CompanionObject && name.is_none() {
            // Kotlin's synthetic name for unnamed companions.
            name = Some("Companion".to_owned());
        }

        let id = self.push(DeclNode {
            kind: decl_kind,
            name,
            text: node.text().to_owned(),
            location: node.location().clone(),
            package: package.to_owned(),
            annotations: parse_annotations(node)?,
            modifiers: parse_modifiers(node)?,
            kdoc: node.doc().map(KDoc::parse),
            parent: Some(parent),
            children: Vec::new(),
            package_decl: None,
        });

        for child in node.children() {
            let child_id = self.build(child, id, package)?;
            self.nodes[id.0].children.push(child_id);
        }
        Ok(id)
    }

    fn push(&mut self, node: DeclNode) -> DeclId {
        let id = DeclId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Handle for the node at `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Decl<'_> {
        assert!(id.0 < self.nodes.len(), "declaration id out of bounds");
        Decl { tree: self, id }
    }

    /// File roots in ingestion order.
    pub fn files(&self) -> impl Iterator<Item = Decl<'_>> {
        self.files.iter().map(move |&id| self.get(id))
    }

    /// Scope over every ingested file.
    #[must_use]
    pub fn scope(&self) -> Scope<'_> {
        Scope::new(self, self.files.clone())
    }

    /// Total number of declaration nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: DeclId) -> &DeclNode {
        &self.nodes[id.0]
    }

    pub(crate) fn kind_of(&self, id: DeclId) -> DeclKind {
        self.nodes[id.0].kind
    }

    pub(crate) fn children_of(&self, id: DeclId) -> &[DeclId] {
        &self.nodes[id.0].children
    }
}

fn parse_modifiers(node: &SyntaxNode) -> Result<Vec<Modifier>, InternalError> {
    node.modifiers()
        .iter()
        .map(|token| {
            token
                .parse::<Modifier>()
                .map_err(|e| InternalError::new(e.to_string(), node))
        })
        .collect()
}

fn parse_annotations(node: &SyntaxNode) -> Result<Vec<Annotation>, InternalError> {
    node.annotations()
        .iter()
        .map(|raw| {
            Annotation::parse(raw, node.location().clone()).ok_or_else(|| {
                InternalError::new(format!("malformed annotation usage '{raw}'"), node)
            })
        })
        .collect()
}

/// Cheap copyable handle to one declaration node.
#[derive(Clone, Copy)]
pub struct Decl<'t> {
    tree: &'t DeclTree,
    id: DeclId,
}

impl<'t> Decl<'t> {
    /// The node's arena identity.
    #[must_use]
    pub fn id(self) -> DeclId {
        self.id
    }

    /// The node kind.
    #[must_use]
    pub fn kind(self) -> DeclKind {
        self.tree.node(self.id).kind
    }

    /// The display name; `None` for anonymous declarations.
    #[must_use]
    pub fn name(self) -> Option<&'t str> {
        self.tree.node(self.id).name.as_deref()
    }

    /// The raw source text.
    #[must_use]
    pub fn text(self) -> &'t str {
        &self.tree.node(self.id).text
    }

    /// The source location.
    #[must_use]
    pub fn location(self) -> &'t Location {
        &self.tree.node(self.id).location
    }

    /// The enclosing declaration, if any.
    #[must_use]
    pub fn parent(self) -> Option<Decl<'t>> {
        self.tree.node(self.id).parent.map(|id| self.tree.get(id))
    }

    /// Direct children in source order.
    pub fn children(self) -> impl Iterator<Item = Decl<'t>> {
        self.tree
            .children_of(self.id)
            .iter()
            .map(move |&id| self.tree.get(id))
    }

    /// The file's package header node; `None` for non-file nodes and for
    /// files without a package header.
    #[must_use]
    pub fn package_declaration(self) -> Option<Decl<'t>> {
        self.tree
            .node(self.id)
            .package_decl
            .map(|id| self.tree.get(id))
    }

    /// Whether this declaration's only ancestor is the file itself.
    #[must_use]
    pub fn is_top_level(self) -> bool {
        self.parent().is_some_and(|p| p.kind() == DeclKind::File)
    }

    /// The containing file node, or `self` when this is a file.
    #[must_use]
    pub fn containing_file(self) -> Decl<'t> {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Package name joined with the enclosing declaration chain and the
    /// node's own name.
    #[must_use]
    pub fn fully_qualified_name(self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut current = Some(self);
        while let Some(decl) = current {
            if decl.kind() == DeclKind::File {
                break;
            }
            if let Some(name) = decl.name() {
                parts.push(name);
            }
            current = decl.parent();
        }
        parts.reverse();
        let chain = parts.join(".");
        let package = self.package_name_internal();
        if package.is_empty() {
            chain
        } else if chain.is_empty() {
            package.to_owned()
        } else {
            format!("{package}.{chain}")
        }
    }

    pub(crate) fn package_name_internal(self) -> &'t str {
        &self.tree.node(self.id).package
    }

    pub(crate) fn annotations_internal(self) -> &'t [Annotation] {
        &self.tree.node(self.id).annotations
    }

    pub(crate) fn modifiers_internal(self) -> &'t [Modifier] {
        &self.tree.node(self.id).modifiers
    }

    pub(crate) fn kdoc_internal(self) -> Option<&'t KDoc> {
        self.tree.node(self.id).kdoc.as_ref()
    }

    pub(crate) fn walk(self, traversal: Traversal) -> Declarations<'t> {
        Declarations::from_roots(self.tree, &[self.id], traversal)
    }

    /// Scope rooted at this declaration.
    #[must_use]
    pub fn subtree_scope(self) -> Scope<'t> {
        Scope::new(self.tree, vec![self.id])
    }

    /// Whether this is a file node.
    #[must_use]
    pub fn is_file(self) -> bool {
        self.kind() == DeclKind::File
    }

    /// Whether this is a package header node.
    #[must_use]
    pub fn is_package(self) -> bool {
        self.kind() == DeclKind::Package
    }

    /// Whether this is a class declaration (any class variant).
    #[must_use]
    pub fn is_class(self) -> bool {
        self.kind() == DeclKind::Class
    }

    /// Whether this is an interface declaration.
    #[must_use]
    pub fn is_interface(self) -> bool {
        self.kind() == DeclKind::Interface
    }

    /// Whether this is an object declaration, companion objects included.
    #[must_use]
    pub fn is_object(self) -> bool {
        matches!(self.kind(), DeclKind::Object | DeclKind::CompanionObject)
    }

    /// Whether this is a companion object.
    #[must_use]
    pub fn is_companion_object(self) -> bool {
        self.kind() == DeclKind::CompanionObject
    }

    /// Whether this is a function declaration.
    #[must_use]
    pub fn is_function(self) -> bool {
        self.kind() == DeclKind::Function
    }

    /// Whether this is a property declaration.
    #[must_use]
    pub fn is_property(self) -> bool {
        self.kind() == DeclKind::Property
    }

    /// Whether this is a primary or secondary constructor.
    #[must_use]
    pub fn is_constructor(self) -> bool {
        matches!(
            self.kind(),
            DeclKind::PrimaryConstructor | DeclKind::SecondaryConstructor
        )
    }

    /// Whether this is a parameter.
    #[must_use]
    pub fn is_parameter(self) -> bool {
        self.kind() == DeclKind::Parameter
    }

    /// Whether this is a `data class`.
    #[must_use]
    pub fn is_data_class(self) -> bool {
        self.is_class() && self.modifiers_internal().contains(&Modifier::Data)
    }

    /// Whether this is a `sealed class`.
    #[must_use]
    pub fn is_sealed_class(self) -> bool {
        self.is_class() && self.modifiers_internal().contains(&Modifier::Sealed)
    }

    /// Whether this is an `enum class`.
    #[must_use]
    pub fn is_enum_class(self) -> bool {
        self.is_class() && self.modifiers_internal().contains(&Modifier::Enum)
    }

    /// Whether this is an `annotation class`.
    #[must_use]
    pub fn is_annotation_class(self) -> bool {
        self.is_class() && self.modifiers_internal().contains(&Modifier::Annotation)
    }

    /// Whether this is a `value class`.
    #[must_use]
    pub fn is_value_class(self) -> bool {
        self.is_class() && self.modifiers_internal().contains(&Modifier::Value)
    }
}

impl PartialEq for Decl<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Decl<'_> {}

impl std::fmt::Debug for Decl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decl")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::kind;

    fn loc(line: usize) -> Location {
        Location::new("Sample.kt", line, 1)
    }

    fn sample_file() -> SyntaxNode {
        SyntaxNode::new(kind::FILE, loc(1))
            .with_name("Sample.kt")
            .with_child(SyntaxNode::new(kind::PACKAGE, loc(1)).with_name("com.sample.core"))
            .with_child(
                SyntaxNode::new(kind::CLASS, loc(3))
                    .with_name("SampleClass")
                    .with_child(
                        SyntaxNode::new(kind::COMPANION_OBJECT, loc(4)).with_modifier("companion"),
                    )
                    .with_child(SyntaxNode::new(kind::FUNCTION, loc(6)).with_name("sampleMethod")),
            )
    }

    #[test]
    fn builds_file_with_package() {
        let mut tree = DeclTree::new();
        let file_id = tree.add_file(&sample_file()).unwrap();
        let file = tree.get(file_id);

        assert_eq!(file.kind(), DeclKind::File);
        assert_eq!(file.package_name_internal(), "com.sample.core");
        let pkg = file.package_declaration().unwrap();
        assert_eq!(pkg.kind(), DeclKind::Package);
        assert_eq!(pkg.name(), Some("com.sample.core"));
        // Package header is not a declaration child.
        assert_eq!(file.children().count(), 1);
    }

    #[test]
    fn companion_without_name_is_auto_named() {
        let mut tree = DeclTree::new();
        let file_id = tree.add_file(&sample_file()).unwrap();
        let class = tree.get(file_id).children().next().unwrap();
        let companion = class.children().next().unwrap();

        assert_eq!(companion.kind(), DeclKind::CompanionObject);
        assert_eq!(companion.name(), Some("Companion"));
        assert!(companion.is_object());
    }

    #[test]
    fn fully_qualified_names_chain_through_parents() {
        let mut tree = DeclTree::new();
        let file_id = tree.add_file(&sample_file()).unwrap();
        let class = tree.get(file_id).children().next().unwrap();
        let method = class.children().nth(1).unwrap();

        assert_eq!(class.fully_qualified_name(), "com.sample.core.SampleClass");
        assert_eq!(
            method.fully_qualified_name(),
            "com.sample.core.SampleClass.sampleMethod"
        );
        assert!(class.is_top_level());
        assert!(!method.is_top_level());
    }

    #[test]
    fn no_package_and_no_enclosing_means_own_name() {
        let file = SyntaxNode::new(kind::FILE, loc(1))
            .with_child(SyntaxNode::new(kind::FUNCTION, loc(1)).with_name("main"));
        let mut tree = DeclTree::new();
        let file_id = tree.add_file(&file).unwrap();
        let main = tree.get(file_id).children().next().unwrap();

        assert_eq!(main.fully_qualified_name(), "main");
        assert_eq!(main.package_name_internal(), "");
    }

    #[test]
    fn unexpected_kind_fails_with_node_text() {
        let file = SyntaxNode::new(kind::FILE, loc(1)).with_child(
            SyntaxNode::new("mystery", loc(2)).with_text("mystery Foo"),
        );
        let err = DeclTree::new().add_file(&file).unwrap_err();
        assert!(err.to_string().contains("unexpected node kind 'mystery'"));
        assert!(err.to_string().contains("mystery Foo"));
    }

    #[test]
    fn non_file_root_is_rejected() {
        let class = SyntaxNode::new(kind::CLASS, loc(1)).with_name("NotAFile");
        assert!(DeclTree::new().add_file(&class).is_err());
    }

    #[test]
    fn unknown_modifier_token_is_rejected() {
        let file = SyntaxNode::new(kind::FILE, loc(1)).with_child(
            SyntaxNode::new(kind::CLASS, loc(2))
                .with_name("Weird")
                .with_modifier("static"),
        );
        let err = DeclTree::new().add_file(&file).unwrap_err();
        assert!(err.to_string().contains("unknown modifier token 'static'"));
    }

    #[test]
    fn class_flag_predicates_derive_from_modifiers() {
        let file = SyntaxNode::new(kind::FILE, loc(1))
            .with_child(
                SyntaxNode::new(kind::CLASS, loc(2))
                    .with_name("UserDto")
                    .with_modifier("data"),
            )
            .with_child(
                SyntaxNode::new(kind::CLASS, loc(3))
                    .with_name("Color")
                    .with_modifier("enum"),
            );
        let mut tree = DeclTree::new();
        let file_id = tree.add_file(&file).unwrap();
        let file = tree.get(file_id);
        let mut children = file.children();
        let dto = children.next().unwrap();
        let color = children.next().unwrap();

        assert!(dto.is_data_class());
        assert!(!dto.is_enum_class());
        assert!(color.is_enum_class());
    }
}
