//! Internal consistency errors.

use crate::location::Location;
use crate::syntax::SyntaxNode;

/// The external parse tree violated an assumed invariant.
///
/// Always fatal to the current analysis unit; carries the offending node's
/// text and location for diagnosis. Query predicates never produce this,
/// it is reserved for structurally impossible input.
#[derive(Debug, thiserror::Error)]
#[error("{message}, declaration at {location}:\n{text}")]
pub struct InternalError {
    message: String,
    text: String,
    location: Location,
}

impl InternalError {
    /// Creates an error pointing at the offending syntax node.
    #[must_use]
    pub fn new(message: impl Into<String>, node: &SyntaxNode) -> Self {
        Self {
            message: message.into(),
            text: node.text().to_owned(),
            location: node.location().clone(),
        }
    }

    /// The offending node's raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The offending node's source location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }
}
