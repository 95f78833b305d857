//! End-to-end checks against git fixtures and prebuilt archives

use std::path::Path;

use pretty_assertions::assert_eq;
use sdist_core::{Error, PrebuiltSdist, Verdict, check};
use sdist_fs::PathSet;
use sdist_test_utils::TestProject;

fn set(paths: &[&str]) -> PathSet {
    PathSet::from_strs(paths).unwrap()
}

const PYPROJECT: &str = r#"[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[project]
name = "demo"
version = "0.1.0"
"#;

fn demo_project() -> TestProject {
    let project = TestProject::new();
    project
        .pyproject(PYPROJECT)
        .track("README.md", "# demo")
        .track("src/demo/__init__.py", "")
        .track(".gitignore", "dist/\n");
    project
}

#[test]
fn test_matching_project() {
    let project = demo_project();
    let sdist = PrebuiltSdist::new(project.sdist(&[
        "pyproject.toml",
        "README.md",
        "src/demo/__init__.py",
    ]));

    let outcome = check(project.root(), &sdist, project.root()).unwrap();

    assert_eq!(outcome.verdict(), Verdict::Match);
    assert!(outcome.sdist.contains("PKG-INFO"));
}

#[test]
fn test_missing_and_extra_files() {
    let project = demo_project();
    let sdist = PrebuiltSdist::new(project.sdist(&[
        "pyproject.toml",
        "src/demo/__init__.py",
        "src/demo/_version.py",
    ]));

    let outcome = check(project.root(), &sdist, project.root()).unwrap();

    assert_eq!(outcome.result.sdist_only, set(&["src/demo/_version.py"]));
    assert_eq!(outcome.result.git_only, set(&["README.md"]));
    assert_eq!(outcome.verdict(), Verdict::Both);
}

#[test]
fn test_untracked_files_are_ignored_in_git_mode() {
    let project = demo_project();
    project.untracked("scratch.py", "");
    let sdist = PrebuiltSdist::new(project.sdist(&[
        "pyproject.toml",
        "README.md",
        "src/demo/__init__.py",
    ]));

    let outcome = check(project.root(), &sdist, project.root()).unwrap();

    assert_eq!(outcome.verdict(), Verdict::Match);
}

#[test]
fn test_all_mode_sees_untracked_files() {
    let project = TestProject::new();
    project
        .pyproject("[tool.check-sdist]\nmode = \"all\"\n")
        .untracked("scratch.py", "");
    let sdist = PrebuiltSdist::new(project.sdist(&["pyproject.toml"]));

    let outcome = check(project.root(), &sdist, project.root()).unwrap();

    assert_eq!(outcome.result.git_only, set(&["scratch.py"]));
    assert_eq!(outcome.verdict(), Verdict::GitOnly);
}

#[test]
fn test_tolerated_patterns_from_pyproject() {
    let project = TestProject::new();
    project
        .pyproject(
            "[tool.check-sdist]\nsdist-only = [\"src/demo/_version.py\"]\ngit-only = [\"docs/\"]\n",
        )
        .track("src/demo/__init__.py", "")
        .track("docs/index.md", "");
    let sdist = PrebuiltSdist::new(project.sdist(&[
        "pyproject.toml",
        "src/demo/__init__.py",
        "src/demo/_version.py",
    ]));

    let outcome = check(project.root(), &sdist, project.root()).unwrap();

    assert_eq!(outcome.verdict(), Verdict::Match);
}

#[test]
fn test_invalid_settings_fail_before_reading_archive() {
    let project = TestProject::new();
    project.pyproject("[tool.check-sdist]\nunknown-key = true\n");
    let sdist = PrebuiltSdist::new(project.root().join("never-built.tar.gz"));

    let err = check(project.root(), &sdist, project.root()).unwrap_err();

    assert!(matches!(err, Error::InvalidSettings { .. }), "got: {err}");
}

#[test]
fn test_outside_repository_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let archive = dir.path().join("demo-0.1.0.tar.gz");
    sdist_test_utils::archive::write_sdist(&archive, "demo-0.1.0", &["setup.py"]);
    let source = dir.path().join("src");
    std::fs::create_dir(&source).unwrap();

    let err = check(&source, &PrebuiltSdist::new(&archive), Path::new(".")).unwrap_err();

    assert!(matches!(err, Error::Git(_)), "got: {err}");
}
