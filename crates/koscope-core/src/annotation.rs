//! Annotation usages attached to declarations.

use crate::location::Location;

/// One annotation usage, as written at the declaration site.
///
/// No import or classpath resolution happens here: the fully qualified name
/// is the dotted path as written in source, or the simple name when the
/// usage is unqualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    text: String,
    name: String,
    fully_qualified_name: String,
    location: Location,
}

impl Annotation {
    /// Parses a raw usage token such as `@Test` or `@org.junit.Test(timeout = 1)`.
    ///
    /// Returns `None` when the token carries no annotation name.
    #[must_use]
    pub fn parse(raw: &str, location: Location) -> Option<Self> {
        let body = raw.trim().trim_start_matches('@');
        let path = body.split('(').next().unwrap_or(body).trim();
        if path.is_empty() {
            return None;
        }
        let name = path.rsplit('.').next().unwrap_or(path).to_owned();
        Some(Self {
            text: raw.trim().to_owned(),
            name,
            fully_qualified_name: path.to_owned(),
            location,
        })
    }

    /// The simple name (last path segment).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dotted path as written in source.
    #[must_use]
    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    /// Whether the usage was written with a qualified (dotted) path.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.fully_qualified_name.contains('.')
    }

    /// The raw usage text, including arguments.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The usage location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Whether `query` matches the simple or the fully qualified name.
    ///
    /// Case-sensitive, exact match only.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        query == self.name || query == self.fully_qualified_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new("A.kt", 1, 1)
    }

    #[test]
    fn parses_simple_usage() {
        let a = Annotation::parse("@Test", loc()).unwrap();
        assert_eq!(a.name(), "Test");
        assert_eq!(a.fully_qualified_name(), "Test");
        assert!(!a.is_qualified());
    }

    #[test]
    fn parses_qualified_usage_with_arguments() {
        let a = Annotation::parse("@org.junit.Test(timeout = 100)", loc()).unwrap();
        assert_eq!(a.name(), "Test");
        assert_eq!(a.fully_qualified_name(), "org.junit.Test");
        assert_eq!(a.text(), "@org.junit.Test(timeout = 100)");
        assert!(a.is_qualified());
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let a = Annotation::parse("@org.junit.Test", loc()).unwrap();
        assert!(a.matches("Test"));
        assert!(a.matches("org.junit.Test"));
        assert!(!a.matches("test"));
        assert!(!a.matches("junit.Test"));
    }

    #[test]
    fn empty_usage_is_rejected() {
        assert!(Annotation::parse("@", loc()).is_none());
    }
}
