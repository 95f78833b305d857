//! Tracked-file listing from the git index

use std::path::Path;

use git2::Repository;
use sdist_fs::{PathSet, RelPath};

use crate::{Error, Result};

/// Index mode of a submodule entry (a "gitlink").
const GITLINK_MODE: u32 = 0o160000;

/// Return the files git tracks under `source_dir`, relative to `source_dir`.
///
/// This is the index view (`git ls-files --cached`): staged files are
/// included even when deleted from the working tree, untracked files are
/// not. With `recurse_submodules`, each initialized submodule contributes
/// its own tracked files in place of its gitlink entry; an uninitialized
/// submodule contributes nothing. Without it, the submodule path itself is
/// listed.
pub fn tracked_files(source_dir: &Path, recurse_submodules: bool) -> Result<PathSet> {
    let repo = Repository::discover(source_dir).map_err(|source| Error::NotARepository {
        path: source_dir.to_path_buf(),
        source,
    })?;
    let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
        path: repo.path().to_path_buf(),
    })?;

    let workdir = dunce::canonicalize(workdir).map_err(|source| Error::Io {
        path: workdir.to_path_buf(),
        source,
    })?;
    let source = dunce::canonicalize(source_dir).map_err(|e| Error::Io {
        path: source_dir.to_path_buf(),
        source: e,
    })?;
    let relative = source
        .strip_prefix(&workdir)
        .map_err(|_| Error::OutsideWorkdir {
            path: source.clone(),
            workdir: workdir.clone(),
        })?;

    let all = index_files(&repo, recurse_submodules)?;

    let files = if relative.as_os_str().is_empty() {
        all
    } else {
        let prefix = RelPath::from_native(relative)?;
        all.iter().filter_map(|path| path.strip_dir(&prefix)).collect()
    };

    tracing::debug!(
        source_dir = %source_dir.display(),
        recurse_submodules,
        files = files.len(),
        "Listed tracked files"
    );
    Ok(files)
}

/// List every index entry of `repo`, relative to its working directory.
fn index_files(repo: &Repository, recurse_submodules: bool) -> Result<PathSet> {
    let index = repo.index()?;
    let mut files = PathSet::new();

    // Conflicted paths appear once per stage; the set collapses them.
    for entry in index.iter() {
        let raw = String::from_utf8_lossy(&entry.path);
        let path = RelPath::new(&*raw)?;

        if entry.mode == GITLINK_MODE && recurse_submodules {
            match open_submodule(repo, &path) {
                Some(submodule) => {
                    let nested = index_files(&submodule, true)?;
                    files.extend(nested.iter().map(|p| p.prefixed(&path)));
                }
                None => {
                    tracing::debug!(submodule = %path, "Skipping uninitialized submodule");
                }
            }
            continue;
        }

        files.insert(path);
    }

    Ok(files)
}

fn open_submodule(repo: &Repository, path: &RelPath) -> Option<Repository> {
    let workdir = repo.workdir()?;
    Repository::open(workdir.join(path.to_native())).ok()
}
