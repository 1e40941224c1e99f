//! Kotlin declaration modifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A declaration modifier keyword.
///
/// Stored per node in insertion order; matching is order-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Abstract,
    Final,
    Open,
    Sealed,
    Data,
    Value,
    Inner,
    Enum,
    Annotation,
    Companion,
    Const,
    Lateinit,
    Override,
    Suspend,
    Inline,
    Noinline,
    Crossinline,
    Operator,
    Infix,
    Tailrec,
    Vararg,
    External,
    Expect,
    Actual,
}

impl Modifier {
    /// The source keyword for this modifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::Open => "open",
            Self::Sealed => "sealed",
            Self::Data => "data",
            Self::Value => "value",
            Self::Inner => "inner",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Companion => "companion",
            Self::Const => "const",
            Self::Lateinit => "lateinit",
            Self::Override => "override",
            Self::Suspend => "suspend",
            Self::Inline => "inline",
            Self::Noinline => "noinline",
            Self::Crossinline => "crossinline",
            Self::Operator => "operator",
            Self::Infix => "infix",
            Self::Tailrec => "tailrec",
            Self::Vararg => "vararg",
            Self::External => "external",
            Self::Expect => "expect",
            Self::Actual => "actual",
        }
    }

    /// Whether this is an explicit visibility modifier.
    #[must_use]
    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            Self::Public | Self::Private | Self::Protected | Self::Internal
        )
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier token the model does not recognize.
#[derive(Debug, thiserror::Error)]
#[error("unknown modifier token '{0}'")]
pub struct UnknownModifier(pub String);

impl FromStr for Modifier {
    type Err = UnknownModifier;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let modifier = match token {
            "public" => Self::Public,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "internal" => Self::Internal,
            "abstract" => Self::Abstract,
            "final" => Self::Final,
            "open" => Self::Open,
            "sealed" => Self::Sealed,
            "data" => Self::Data,
            "value" => Self::Value,
            "inner" => Self::Inner,
            "enum" => Self::Enum,
            "annotation" => Self::Annotation,
            "companion" => Self::Companion,
            "const" => Self::Const,
            "lateinit" => Self::Lateinit,
            "override" => Self::Override,
            "suspend" => Self::Suspend,
            "inline" => Self::Inline,
            "noinline" => Self::Noinline,
            "crossinline" => Self::Crossinline,
            "operator" => Self::Operator,
            "infix" => Self::Infix,
            "tailrec" => Self::Tailrec,
            "vararg" => Self::Vararg,
            "external" => Self::External,
            "expect" => Self::Expect,
            "actual" => Self::Actual,
            other => return Err(UnknownModifier(other.to_owned())),
        };
        Ok(modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_keywords() {
        for token in ["private", "sealed", "data", "companion", "tailrec"] {
            let modifier: Modifier = token.parse().unwrap();
            assert_eq!(modifier.as_str(), token);
        }
    }

    #[test]
    fn rejects_unknown_token() {
        assert!("static".parse::<Modifier>().is_err());
    }

    #[test]
    fn visibility_classification() {
        assert!(Modifier::Protected.is_visibility());
        assert!(Modifier::Internal.is_visibility());
        assert!(!Modifier::Data.is_visibility());
    }
}
