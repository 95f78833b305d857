//! Filesystem glob expansion relative to a root directory
//!
//! Unlike gitignore matching, expansion enumerates entries that exist on
//! disk right now. An exclusion pattern naming a file that has since been
//! deleted expands to nothing.

use std::path::Path;

use crate::{Error, PathSet, RelPath, Result};

/// Expand `pattern` against the filesystem under `root`.
///
/// Returns the matching entries (files and directories) as paths relative to
/// `root`. A pattern matching nothing yields an empty set.
pub fn expand(root: &Path, pattern: &str) -> Result<PathSet> {
    let trimmed = pattern.trim_end_matches('/');
    if trimmed.starts_with('/') {
        return Err(Error::GlobPattern {
            pattern: pattern.to_string(),
            message: "absolute patterns are not supported".to_string(),
        });
    }
    if trimmed.is_empty() {
        return Ok(PathSet::new());
    }

    let root_str = root
        .to_str()
        .ok_or_else(|| Error::invalid_path(root.to_string_lossy(), "root is not valid UTF-8"))?;
    let full_pattern = if root_str.is_empty() {
        trimmed.to_string()
    } else {
        format!(
            "{}/{}",
            ::glob::Pattern::escape(root_str.trim_end_matches('/')),
            trimmed
        )
    };

    let entries = ::glob::glob(&full_pattern).map_err(|e| Error::GlobPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let mut matches = PathSet::new();
    for entry in entries {
        let found = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io(path, e.into_error())
        })?;
        let relative = found.strip_prefix(root).unwrap_or(&found);
        // The root itself can match patterns like `.`; it is not a member.
        if relative.as_os_str().is_empty() {
            continue;
        }
        if let Ok(path) = RelPath::from_native(relative) {
            matches.insert(path);
        }
    }

    tracing::debug!(pattern, root = %root.display(), matched = matches.len(), "Expanded glob");
    Ok(matches)
}
