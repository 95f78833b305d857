//! Git repository fixtures built with `git2`.
//!
//! Nothing here shells out to the `git` CLI, so tests run wherever
//! libgit2 builds.

use std::fs;
use std::path::Path;

use git2::{Repository, Signature};

/// Initialises a real git repository using `git2` (no commits, empty index).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Write `path` (relative to the repository root) with `content` and stage it.
///
/// # Panics
/// Panics if writing the file or updating the index fails.
pub fn stage_file(repo: &Repository, path: &str, content: &str) {
    let root = repo
        .workdir()
        .unwrap_or_else(|| panic!("stage_file: repository is bare"));
    let full_path = root.join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("stage_file: failed to create {}: {e}", parent.display()));
    }
    fs::write(&full_path, content)
        .unwrap_or_else(|e| panic!("stage_file: failed to write {}: {e}", full_path.display()));

    let mut index = repo.index().expect("stage_file: failed to open index");
    index
        .add_path(Path::new(path))
        .unwrap_or_else(|e| panic!("stage_file: failed to stage {path}: {e}"));
    index.write().expect("stage_file: failed to write index");
}

/// Commit the current index on top of HEAD (or as the root commit).
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_index(repo: &Repository, message: &str) -> git2::Oid {
    let signature =
        Signature::now("Test User", "test@test.com").expect("commit_index: bad signature");
    let mut index = repo.index().expect("commit_index: failed to open index");
    let tree_id = index.write_tree().expect("commit_index: failed to write tree");
    let tree = repo.find_tree(tree_id).expect("commit_index: tree not found");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("commit_index: failed to commit")
}

/// Create a committed repository at `root/path` and register it in `parent`'s
/// index as a submodule gitlink.
///
/// # Panics
/// Panics if any git operation fails.
pub fn add_submodule(parent: &Repository, path: &str, files: &[(&str, &str)]) -> Repository {
    let root = parent
        .workdir()
        .unwrap_or_else(|| panic!("add_submodule: parent repository is bare"));
    let sub_root = root.join(path);
    fs::create_dir_all(&sub_root)
        .unwrap_or_else(|e| panic!("add_submodule: failed to create {}: {e}", sub_root.display()));

    let submodule = real_git_repo(&sub_root);
    for (file, content) in files {
        stage_file(&submodule, file, content);
    }
    commit_index(&submodule, "Submodule commit");

    let mut index = parent.index().expect("add_submodule: failed to open index");
    index
        .add_path(Path::new(path))
        .unwrap_or_else(|e| panic!("add_submodule: failed to add gitlink {path}: {e}"));
    index.write().expect("add_submodule: failed to write index");

    submodule
}
