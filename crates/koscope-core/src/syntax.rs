//! The external-parser boundary.
//!
//! [`SyntaxNode`] is the tree handed to this crate by a language front-end.
//! This crate makes no assumption about how the tree was produced beyond the
//! fields present here: a string kind tag, an optional name, the raw text,
//! a source location, raw modifier and annotation tokens, an optional raw
//! documentation block, and ordered children.

use crate::location::Location;

/// Canonical kind tags a front-end emits for declaration nodes.
///
/// Ingestion fails with an internal consistency error on any other tag.
pub mod kind {
    /// A source file root.
    pub const FILE: &str = "file";
    /// A package header.
    pub const PACKAGE: &str = "package";
    /// A class declaration (data/sealed/enum/annotation/value variants are
    /// expressed through modifier tokens).
    pub const CLASS: &str = "class";
    /// An interface declaration.
    pub const INTERFACE: &str = "interface";
    /// An object declaration.
    pub const OBJECT: &str = "object";
    /// A companion object declaration.
    pub const COMPANION_OBJECT: &str = "companion_object";
    /// A function declaration.
    pub const FUNCTION: &str = "function";
    /// A property declaration.
    pub const PROPERTY: &str = "property";
    /// A primary constructor.
    pub const PRIMARY_CONSTRUCTOR: &str = "primary_constructor";
    /// A secondary constructor.
    pub const SECONDARY_CONSTRUCTOR: &str = "secondary_constructor";
    /// A function or constructor parameter.
    pub const PARAMETER: &str = "parameter";
}

/// One node of an externally parsed syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: String,
    name: Option<String>,
    text: String,
    location: Location,
    modifiers: Vec<String>,
    annotations: Vec<String>,
    doc: Option<String>,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a node with the given kind tag and location.
    #[must_use]
    pub fn new(kind: impl Into<String>, location: Location) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            text: String::new(),
            location,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            doc: None,
            children: Vec::new(),
        }
    }

    /// Sets the declared name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the raw source text span.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Appends a raw modifier token (e.g. `"private"`, `"data"`).
    #[must_use]
    pub fn with_modifier(mut self, token: impl Into<String>) -> Self {
        self.modifiers.push(token.into());
        self
    }

    /// Appends raw modifier tokens.
    #[must_use]
    pub fn with_modifiers<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Appends a raw annotation usage (e.g. `"@Test"`, `"@org.junit.Test"`).
    #[must_use]
    pub fn with_annotation(mut self, usage: impl Into<String>) -> Self {
        self.annotations.push(usage.into());
        self
    }

    /// Sets the raw documentation block attached to this node.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends child nodes.
    #[must_use]
    pub fn with_children<I: IntoIterator<Item = SyntaxNode>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// The discriminant kind tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The declared name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The raw source text of this node.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The source location of this node.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Raw modifier tokens in declaration order.
    #[must_use]
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Raw annotation usages in declaration order.
    #[must_use]
    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    /// The raw documentation block, if present.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Ordered child nodes.
    #[must_use]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_fields() {
        let node = SyntaxNode::new(kind::CLASS, Location::new("A.kt", 3, 1))
            .with_name("SampleClass")
            .with_text("class SampleClass")
            .with_modifier("open")
            .with_annotation("@Deprecated")
            .with_doc("/** Sample. */")
            .with_child(SyntaxNode::new(kind::FUNCTION, Location::new("A.kt", 4, 5)));

        assert_eq!(node.kind(), kind::CLASS);
        assert_eq!(node.name(), Some("SampleClass"));
        assert_eq!(node.modifiers(), ["open"]);
        assert_eq!(node.annotations(), ["@Deprecated"]);
        assert_eq!(node.doc(), Some("/** Sample. */"));
        assert_eq!(node.children().len(), 1);
    }
}
