//! [`TestProject`] builder for check-sdist scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use tempfile::TempDir;

use crate::{archive, git};

/// A temporary Python project checkout backed by a real git repository.
///
/// Built archives are written to a separate scratch directory so they never
/// show up in the project tree.
///
/// # Example
///
/// ```rust,no_run
/// use sdist_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.track("pyproject.toml", "[project]\nname = \"demo\"\n");
/// project.track("src/demo/__init__.py", "");
/// let sdist = project.sdist(&["pyproject.toml", "src/demo/__init__.py"]);
/// assert!(sdist.exists());
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    out_dir: TempDir,
    repo: Repository,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty git repository in a temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let repo = git::real_git_repo(temp_dir.path());
        Self {
            temp_dir,
            out_dir,
            repo,
        }
    }

    /// Return the root path of the project checkout.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Write `path` and stage it in the git index.
    pub fn track(&self, path: &str, content: &str) -> &Self {
        git::stage_file(&self.repo, path, content);
        self
    }

    /// Write `path` without telling git about it.
    pub fn untracked(&self, path: &str, content: &str) -> &Self {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
        self
    }

    /// Write and stage `pyproject.toml`.
    pub fn pyproject(&self, content: &str) -> &Self {
        self.track("pyproject.toml", content)
    }

    /// Write an SDist named `demo-0.1.0.tar.gz` containing `files` under the
    /// `demo-0.1.0/` prefix, plus `PKG-INFO`.
    pub fn sdist(&self, files: &[&str]) -> PathBuf {
        let path = self.out_dir.path().join("demo-0.1.0.tar.gz");
        archive::write_sdist(&path, "demo-0.1.0", files);
        path
    }

    /// Write an arbitrary archive into the scratch directory.
    pub fn archive(&self, name: &str, members: &[archive::Member<'_>]) -> PathBuf {
        let path = self.out_dir.path().join(name);
        archive::write_tar_gz(&path, members);
        path
    }
}
