//! Architecture validation errors.

/// A rejected architecture definition.
///
/// Nothing usable escapes a failed build; callers get exactly one of these.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureError {
    /// The dependency edges close a cycle.
    ///
    /// The chain lists the layers along the first back edge found, arrow
    /// separated, starting and ending at the same layer. The message format
    /// is stable and matched verbatim by downstream tooling.
    #[error("Illegal circular dependencies:\n{chain}.")]
    CircularDependencies {
        /// The offending layer chain, `" -->\n"` separated.
        chain: String,
    },

    /// A layer was declared to depend on itself.
    #[error("layer {layer} cannot depend on itself")]
    SelfDependency {
        /// The offending layer name.
        layer: String,
    },

    /// A dependency edge references a layer that was never declared.
    #[error("unknown layer '{name}' in dependency definition")]
    UnknownLayer {
        /// The undeclared layer name.
        name: String,
    },
}
