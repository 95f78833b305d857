//! Pattern filters over path sets
//!
//! Two primitives with different semantics:
//!
//! - [`filter`] evaluates gitignore rules purely against path strings
//!   (last match wins, `!` re-includes, directory rules cover everything
//!   beneath them).
//! - [`glob_filter`] expands glob patterns against the filesystem and
//!   subtracts whatever currently exists.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use sdist_fs::{PathSet, RelPath};

use crate::{Error, Result};

/// An ordered list of gitignore-style rules.
#[derive(Debug, Clone)]
pub struct PatternList {
    matcher: Gitignore,
    len: usize,
}

impl PatternList {
    /// Compile `patterns` in order.
    ///
    /// Blank lines and `#` comments are accepted and ignored, as in a
    /// `.gitignore` file.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // An empty root keeps matching purely lexical on relative paths.
        let mut builder = GitignoreBuilder::new("");
        let mut len = 0;
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder
                .add_line(None, pattern)
                .map_err(|e| invalid_pattern(pattern, e))?;
            len += 1;
        }
        let matcher = builder
            .build()
            .map_err(|e| invalid_pattern("<pattern list>", e))?;
        Ok(Self { matcher, len })
    }

    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            len: 0,
        }
    }

    /// Number of lines the list was built from, comments included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `path` (or one of its parent directories) is ignored.
    pub fn is_excluded(&self, path: &RelPath) -> bool {
        self.matcher
            .matched_path_or_any_parents(path.as_str(), false)
            .is_ignore()
    }

    /// The subset of `paths` not excluded by this list.
    pub fn filter(&self, paths: &PathSet) -> PathSet {
        paths.filtered(|path| !self.is_excluded(path))
    }
}

fn invalid_pattern(pattern: &str, err: ignore::Error) -> Error {
    Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    }
}

/// Remove every path matching `patterns` under gitignore semantics.
///
/// # Example
///
/// ```
/// use sdist_core::pattern::filter;
/// use sdist_fs::PathSet;
///
/// let paths = PathSet::from_strs(["a.txt", "keep.txt"]).unwrap();
/// let kept = filter(&["*.txt", "!keep.txt"], &paths).unwrap();
///
/// assert_eq!(kept, PathSet::from_strs(["keep.txt"]).unwrap());
/// ```
pub fn filter<S: AsRef<str>>(patterns: &[S], paths: &PathSet) -> Result<PathSet> {
    Ok(PatternList::new(patterns)?.filter(paths))
}

/// Remove every path that glob expansion of `patterns` under `root` yields.
///
/// Only the exact expanded entries are subtracted; a pattern expanding to a
/// directory does not remove the files inside it.
pub fn glob_filter<S: AsRef<str>>(patterns: &[S], paths: &PathSet, root: &Path) -> Result<PathSet> {
    let mut remaining = paths.clone();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let expanded = sdist_fs::glob::expand(root, pattern)?;
        tracing::debug!(pattern, matched = expanded.len(), "Expanded exclusion glob");
        remaining = remaining.difference(&expanded);
    }
    Ok(remaining)
}
