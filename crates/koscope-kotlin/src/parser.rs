//! Kotlin source extraction using Tree-sitter.

use std::path::Path;

use koscope_core::{kind, Location, Modifier, SyntaxNode};
use tree_sitter::{Language, Node, Parser};

/// Errors raised while turning Kotlin source into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The Kotlin grammar could not be loaded into the parser.
    #[error("failed to load the Kotlin grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The parser produced no tree for the input.
    #[error("could not parse {path}")]
    Unparsable {
        /// The offending file path.
        path: String,
    },
}

/// Parses Kotlin source into the declaration syntax tree.
pub struct KotlinParser {
    language: Language,
}

impl KotlinParser {
    /// Creates a new Kotlin parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_kotlin_ng::LANGUAGE.into(),
        }
    }

    /// Parses one file's source into a file-rooted syntax node.
    ///
    /// Imports, expressions, and statements are dropped; only declaration
    /// structure survives, with the package header as the file's first
    /// child when present.
    pub fn parse(&self, source: &str, path: &Path) -> Result<SyntaxNode, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or_else(|| ParseError::Unparsable {
                path: path.display().to_string(),
            })?;
        let root = tree.root_node();

        let mut file =
            SyntaxNode::new(kind::FILE, location(&root, path)).with_text(source.to_owned());

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() == "package_header" {
                if let Some(pkg) = package_node(&child, src, path) {
                    file = file.with_child(pkg);
                }
            }
        }
        let declarations = collect_declarations(&root, src, path);
        tracing::debug!(
            path = %path.display(),
            declarations = declarations.len(),
            "parsed kotlin source"
        );
        Ok(file.with_children(declarations))
    }
}

impl Default for KotlinParser {
    fn default() -> Self {
        Self::new()
    }
}

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
}

fn location(node: &Node<'_>, path: &Path) -> Location {
    let pos = node.start_position();
    Location::new(path, pos.row + 1, pos.column + 1)
}

/// Joins identifier children of a `qualified_identifier` node with dots.
fn qualified_id(node: &Node<'_>, src: &[u8]) -> String {
    let mut parts = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "identifier" {
            parts.push(text(&child, src).to_owned());
        }
    }
    parts.join(".")
}

fn package_node(node: &Node<'_>, src: &[u8], path: &Path) -> Option<SyntaxNode> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "qualified_identifier" {
            return Some(
                SyntaxNode::new(kind::PACKAGE, location(node, path))
                    .with_name(qualified_id(&child, src))
                    .with_text(text(node, src).to_owned()),
            );
        }
    }
    None
}

/// Maps a grammar node onto a canonical declaration kind tag.
fn declaration_tag(node: &Node<'_>) -> Option<&'static str> {
    let tag = match node.kind() {
        "class_declaration" => {
            if has_child_kind(node, "interface") {
                kind::INTERFACE
            } else {
                kind::CLASS
            }
        }
        "object_declaration" => {
            if has_child_kind(node, "companion") {
                kind::COMPANION_OBJECT
            } else {
                kind::OBJECT
            }
        }
        "companion_object" => kind::COMPANION_OBJECT,
        "function_declaration" => kind::FUNCTION,
        "property_declaration" => kind::PROPERTY,
        "secondary_constructor" => kind::SECONDARY_CONSTRUCTOR,
        _ => return None,
    };
    Some(tag)
}

fn has_child_kind(node: &Node<'_>, wanted: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == wanted {
            return true;
        }
    }
    false
}

/// Scans `node`'s subtree for declarations, stopping the descent at each
/// declaration found; nested structure is handled by `convert_declaration`.
fn collect_declarations(node: &Node<'_>, src: &[u8], path: &Path) -> Vec<SyntaxNode> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if declaration_tag(&child).is_some() {
            if let Some(decl) = convert_declaration(&child, src, path) {
                out.push(decl);
            }
        } else {
            out.extend(collect_declarations(&child, src, path));
        }
    }
    out
}

fn convert_declaration(node: &Node<'_>, src: &[u8], path: &Path) -> Option<SyntaxNode> {
    let tag = declaration_tag(node)?;

    let mut decl = SyntaxNode::new(tag, location(node, path)).with_text(text(node, src).to_owned());
    if let Some(name) = declared_name(node, src) {
        decl = decl.with_name(name);
    }
    let (modifiers, annotations) = modifier_tokens(node, src);
    decl = decl.with_modifiers(modifiers);
    for usage in annotations {
        decl = decl.with_annotation(usage);
    }
    if let Some(doc) = leading_doc(node, src) {
        decl = decl.with_doc(doc);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "primary_constructor" => {
                decl = decl.with_child(primary_constructor(&child, src, path));
            }
            "class_body" | "enum_class_body" | "function_body" | "getter" | "setter" => {
                decl = decl.with_children(collect_declarations(&child, src, path));
            }
            _ => {}
        }
    }
    Some(decl)
}

fn declared_name(node: &Node<'_>, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" | "simple_identifier" | "type_identifier" => {
                return Some(text(&child, src).to_owned());
            }
            // properties name their binding one level down
            "variable_declaration" | "multi_variable_declaration" => {
                if let Some(name) = declared_name(&child, src) {
                    return Some(name);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits the `modifiers` subtree into modifier keywords and annotation
/// usages. Annotation subtrees are not descended into, so their identifier
/// tokens never masquerade as modifiers.
fn modifier_tokens(node: &Node<'_>, src: &[u8]) -> (Vec<String>, Vec<String>) {
    let mut modifiers = Vec::new();
    let mut annotations = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" {
            collect_modifier_tokens(&child, src, &mut modifiers, &mut annotations);
        }
    }
    (modifiers, annotations)
}

fn collect_modifier_tokens(
    node: &Node<'_>,
    src: &[u8],
    modifiers: &mut Vec<String>,
    annotations: &mut Vec<String>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind().contains("annotation") {
            annotations.push(text(&child, src).to_owned());
        } else if child.child_count() == 0 {
            let token = text(&child, src);
            if token.parse::<Modifier>().is_ok() {
                modifiers.push(token.to_owned());
            }
        } else {
            collect_modifier_tokens(&child, src, modifiers, annotations);
        }
    }
}

/// The KDoc block immediately preceding a declaration, if any.
fn leading_doc(node: &Node<'_>, src: &[u8]) -> Option<String> {
    let mut prev = node.prev_sibling();
    while let Some(sibling) = prev {
        if sibling.kind().contains("comment") {
            let raw = text(&sibling, src);
            if raw.starts_with("/**") {
                return Some(raw.to_owned());
            }
            prev = sibling.prev_sibling();
        } else {
            return None;
        }
    }
    None
}

fn primary_constructor(node: &Node<'_>, src: &[u8], path: &Path) -> SyntaxNode {
    let mut ctor = SyntaxNode::new(kind::PRIMARY_CONSTRUCTOR, location(node, path))
        .with_text(text(node, src).to_owned());
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "class_parameter" {
            let mut param = SyntaxNode::new(kind::PARAMETER, location(&child, path))
                .with_text(text(&child, src).to_owned());
            if let Some(name) = declared_name(&child, src) {
                param = param.with_name(name);
            }
            ctor = ctor.with_child(param);
        }
    }
    ctor
}
