//! Full directory listing, independent of VCS tracking status.

use std::path::Path;

use ignore::WalkBuilder;

use crate::{Error, PathSet, RelPath, Result};

/// VCS internal directories that are never listed.
pub const VCS_INTERNALS: &[&str] = &[
    ".git", ".jj", ".svn", ".hg", ".bzr", "_darcs", ".pijul", "CVS", ".fossil",
];

/// List every regular file under `root`, relative to `root`.
///
/// Ignore files are not consulted and hidden entries are included; only
/// VCS metadata directories are skipped. Symlinks are not followed.
pub fn all_files(root: &Path) -> Result<PathSet> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir
                && entry.depth() > 0
                && VCS_INTERNALS
                    .iter()
                    .any(|name| entry.file_name() == std::ffi::OsStr::new(name)))
        })
        .build();

    let mut files = PathSet::new();
    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::invalid_path(entry.path().to_string_lossy(), "outside of walk root"))?;
        files.insert(RelPath::from_native(relative)?);
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Listed all files");
    Ok(files)
}
