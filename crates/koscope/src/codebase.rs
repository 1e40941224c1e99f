//! Codebase loading.

use std::path::{Path, PathBuf};

use koscope_core::{DeclTree, InternalError, Scope};
use koscope_kotlin::{KotlinParser, ParseError};
use tracing::{debug, info};

/// Errors raised while loading Kotlin sources into a codebase.
#[derive(Debug, thiserror::Error)]
pub enum CodebaseError {
    /// The discovery glob pattern was invalid.
    #[error("invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A discovered file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The front-end failed on a file.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The extracted tree violated a model invariant.
    #[error(transparent)]
    Model(#[from] InternalError),
}

/// All declarations loaded from a set of Kotlin sources.
///
/// One arena holds every file; scopes and declaration handles borrow from
/// it for the codebase's lifetime.
#[derive(Debug)]
pub struct Codebase {
    tree: DeclTree,
}

impl Codebase {
    /// Loads every `*.kt` file under `root`, recursively.
    ///
    /// Files are visited in path order, so walks over the resulting scope
    /// are deterministic for a fixed directory content.
    pub fn from_directory(root: &Path) -> Result<Self, CodebaseError> {
        let pattern = format!("{}/**/*.kt", root.display());
        let parser = KotlinParser::new();
        let mut tree = DeclTree::new();
        let mut files = 0usize;

        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    let path = e.path().to_path_buf();
                    return Err(CodebaseError::Io {
                        path,
                        source: e.into(),
                    });
                }
            };
            debug!(path = %path.display(), "loading source file");
            let source =
                std::fs::read_to_string(&path).map_err(|source| CodebaseError::Io {
                    path: path.clone(),
                    source,
                })?;
            let file = parser.parse(&source, &path)?;
            tree.add_file(&file)?;
            files += 1;
        }

        info!(root = %root.display(), files, "loaded codebase");
        Ok(Self { tree })
    }

    /// Loads a single in-memory Kotlin snippet.
    pub fn from_source(source: &str) -> Result<Self, CodebaseError> {
        Self::from_sources([source])
    }

    /// Loads multiple in-memory Kotlin snippets, in order.
    pub fn from_sources<I, S>(sources: I) -> Result<Self, CodebaseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parser = KotlinParser::new();
        let mut tree = DeclTree::new();
        for (index, source) in sources.into_iter().enumerate() {
            let path = PathBuf::from(format!("snippet{}.kt", index + 1));
            let file = parser.parse(source.as_ref(), &path)?;
            tree.add_file(&file)?;
        }
        Ok(Self { tree })
    }

    /// The scope spanning every loaded file.
    #[must_use]
    pub fn scope(&self) -> Scope<'_> {
        self.tree.scope()
    }

    /// The underlying declaration arena.
    #[must_use]
    pub fn tree(&self) -> &DeclTree {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koscope_core::{DeclQueries, Traversal};

    #[test]
    fn loads_a_single_snippet() {
        let codebase = Codebase::from_source(
            "package com.sample\n\nclass Greeter {\n    fun greet() { }\n}\n",
        )
        .unwrap();
        let scope = codebase.scope();
        assert!(scope.has_declaration_with_name(Traversal::ALL, &["Greeter"]));
        assert!(scope.has_declaration_with_name(Traversal::ALL, &["greet"]));
    }

    #[test]
    fn loads_snippets_in_order() {
        let codebase =
            Codebase::from_sources(["class First\n", "class Second\n"]).unwrap();
        let names: Vec<_> = codebase
            .scope()
            .declarations(Traversal::ALL)
            .filter_map(|d| d.name().map(ToOwned::to_owned))
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn missing_directory_yields_an_empty_codebase() {
        // the glob simply matches nothing
        let codebase =
            Codebase::from_directory(Path::new("/nonexistent/koscope-test")).unwrap();
        assert!(!codebase.scope().has_declarations(Traversal::ALL));
    }
}
