//! Normalized relative path handling

use std::borrow::Borrow;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{Error, Result};

/// A project-relative file path normalized to forward slashes.
///
/// The internal representation never starts with `/`, never contains empty,
/// `.` or `..` segments, and never ends with a separator. Two paths naming
/// the same file from the git index and from an archive therefore compare
/// equal as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl RelPath {
    /// Normalize `path` into a relative path.
    ///
    /// Backslashes become forward slashes, and empty and `.` segments are
    /// dropped. Absolute paths, `..` segments, and paths that normalize to
    /// nothing are rejected.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();
        let unified = raw.replace('\\', "/");

        if unified.starts_with('/') {
            return Err(Error::invalid_path(raw, "absolute paths are not allowed"));
        }

        let mut segments = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(Error::invalid_path(raw, "parent segments are not allowed"));
                }
                other => segments.push(other),
            }
        }

        if segments.is_empty() {
            return Err(Error::invalid_path(raw, "path is empty"));
        }

        Ok(Self {
            inner: segments.join("/"),
        })
    }

    /// Normalize a platform-native relative path.
    pub fn from_native(path: &Path) -> Result<Self> {
        Self::new(path.to_string_lossy())
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        self.inner.split('/').collect()
    }

    /// Iterate over the path segments.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/')
    }

    /// Get the file name component.
    pub fn file_name(&self) -> &str {
        self.inner.rsplit('/').next().unwrap_or(&self.inner)
    }

    /// Get the parent directory, or `None` for a top-level entry.
    pub fn parent(&self) -> Option<Self> {
        self.inner.rfind('/').map(|idx| Self {
            inner: self.inner[..idx].to_string(),
        })
    }

    /// Split off the first segment.
    ///
    /// Returns the leading segment and the remainder, which is `None` when
    /// the path has a single segment.
    pub fn split_first(&self) -> (&str, Option<Self>) {
        match self.inner.split_once('/') {
            Some((head, rest)) => (
                head,
                Some(Self {
                    inner: rest.to_string(),
                }),
            ),
            None => (&self.inner, None),
        }
    }

    /// Prefix this path with a directory.
    pub fn prefixed(&self, dir: &RelPath) -> Self {
        Self {
            inner: format!("{}/{}", dir.inner, self.inner),
        }
    }

    /// Strip a leading directory, returning the path relative to it.
    pub fn strip_dir(&self, dir: &RelPath) -> Option<Self> {
        self.inner
            .strip_prefix(dir.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| Self {
                inner: rest.to_string(),
            })
    }
}

impl AsRef<Path> for RelPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl Borrow<str> for RelPath {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl FromStr for RelPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for RelPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for RelPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_first_nested() {
        let path = RelPath::new("pkg-1.0/src/mod.py").unwrap();
        let (head, rest) = path.split_first();
        assert_eq!(head, "pkg-1.0");
        assert_eq!(rest.unwrap().as_str(), "src/mod.py");
    }

    #[test]
    fn test_split_first_single_segment() {
        let path = RelPath::new("pkg-1.0").unwrap();
        let (head, rest) = path.split_first();
        assert_eq!(head, "pkg-1.0");
        assert!(rest.is_none());
    }

    #[test]
    fn test_strip_dir_requires_segment_boundary() {
        let path = RelPath::new("docs-extra/index.md").unwrap();
        let dir = RelPath::new("docs").unwrap();
        assert!(path.strip_dir(&dir).is_none());

        let path = RelPath::new("docs/index.md").unwrap();
        assert_eq!(path.strip_dir(&dir).unwrap().as_str(), "index.md");
    }

    #[test]
    fn test_prefixed() {
        let path = RelPath::new("lib.rs").unwrap();
        let dir = RelPath::new("vendor/sub").unwrap();
        assert_eq!(path.prefixed(&dir).as_str(), "vendor/sub/lib.rs");
    }
}
