//! Temporary junk-file injection for self-testing.
//!
//! A build backend that picks up caches, virtualenvs or build output is the
//! most common way an SDist ends up with files git never saw. Injecting a
//! representative set of such files before building surfaces that problem
//! even in a freshly cloned checkout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Common junk left behind by Python tooling.
///
/// Entries ending in `/` are directories; a `junk.py` file is created inside.
pub const JUNK_FILES: &[&str] = &[
    ".coverage",
    ".mypy_cache/",
    ".pytest_cache/",
    ".ruff_cache/",
    ".tox/",
    ".venv/",
    "dist/",
    "tests/__pycache__/",
    "tests/any/__pycache__/",
    "anything.egg-info/",
    "__pycache__/",
];

/// Files and directories created by [`inject_files`].
///
/// Everything recorded here is removed when the guard is dropped: files
/// first, then directories from the deepest up. Entries that existed before
/// injection are never recorded and never touched.
#[derive(Debug, Default)]
#[must_use = "injected files are removed as soon as the guard is dropped"]
pub struct InjectedFiles {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
}

impl InjectedFiles {
    /// Files created by the injection.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Directories created by the injection.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Remove everything that was injected, reporting the first failure.
    pub fn restore(mut self) -> Result<()> {
        self.remove_all()
    }

    fn remove_all(&mut self) -> Result<()> {
        let mut first_error = None;

        for file in self.files.drain(..) {
            if let Err(e) = fs::remove_file(&file) {
                first_error.get_or_insert(Error::io(&file, e));
            }
        }

        self.directories
            .sort_by_key(|dir| std::cmp::Reverse(dir.as_os_str().len()));
        for dir in self.directories.drain(..) {
            if let Err(e) = fs::remove_dir(&dir) {
                first_error.get_or_insert(Error::io(&dir, e));
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for InjectedFiles {
    fn drop(&mut self) {
        if let Err(e) = self.remove_all() {
            tracing::warn!(error = %e, "Failed to clean up injected files");
        }
    }
}

/// Create `entries` under `source_dir`, skipping any that already exist.
pub fn inject_files(source_dir: &Path, entries: &[&str]) -> Result<InjectedFiles> {
    let mut injected = InjectedFiles::default();

    for entry in entries {
        let added_file = match entry.strip_suffix('/') {
            Some(dir) => source_dir.join(dir).join("junk.py"),
            None => source_dir.join(entry),
        };
        if added_file.exists() {
            continue;
        }

        // Record the directories that are about to be created
        if let Some(parent) = added_file.parent() {
            let mut missing = parent;
            while !missing.is_dir() {
                injected.directories.push(missing.to_path_buf());
                match missing.parent() {
                    Some(up) => missing = up,
                    None => break,
                }
            }
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        fs::File::create_new(&added_file).map_err(|e| Error::io(&added_file, e))?;
        injected.files.push(added_file);
    }

    tracing::debug!(
        files = injected.files.len(),
        directories = injected.directories.len(),
        "Injected junk files"
    );
    Ok(injected)
}

/// Inject [`JUNK_FILES`] into `source_dir`.
pub fn inject_junk_files(source_dir: &Path) -> Result<InjectedFiles> {
    inject_files(source_dir, JUNK_FILES)
}
