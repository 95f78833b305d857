//! Tests for build-backend exclusion resolution

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use sdist_core::backend::{BackendRequest, resolve};
use sdist_core::{Error, Pyproject};
use sdist_fs::PathSet;
use tempfile::TempDir;

fn set(paths: &[&str]) -> PathSet {
    PathSet::from_strs(paths).unwrap()
}

/// Create empty files under `root` so glob-mode backends can see them.
fn touch_all(root: &Path, paths: &[&str]) {
    for path in paths {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, "").unwrap();
    }
}

#[test]
fn test_hatchling_gitignore_exclusions() {
    let pyproject = Pyproject::parse(
        r#"
[build-system]
build-backend = "hatchling.build"

[tool.hatch.build.targets.sdist]
exclude = ["ignore*"]
"#,
    )
    .unwrap();
    let files = set(&["ignore-me.txt", "keep.txt"]);
    let root = TempDir::new().unwrap();

    let kept = resolve(&BackendRequest::Auto, &pyproject, &files, root.path()).unwrap();

    assert_eq!(kept, set(&["keep.txt"]));
}

#[test]
fn test_scikit_build_directory_rule() {
    let pyproject = Pyproject::parse(
        "[tool.scikit-build.sdist]\nexclude = [\"/extern/\", \"*.bin\"]\n",
    )
    .unwrap();
    let files = set(&["extern/lib/a.c", "src/data.bin", "src/main.cpp"]);
    let root = TempDir::new().unwrap();

    let kept = resolve(
        &BackendRequest::from("scikit_build_core.build"),
        &pyproject,
        &files,
        root.path(),
    )
    .unwrap();

    assert_eq!(kept, set(&["src/main.cpp"]));
}

#[test]
fn test_none_leaves_files_unchanged() {
    let pyproject = Pyproject::parse(
        "[build-system]\nbuild-backend = \"hatchling.build\"\n\n\
         [tool.hatch.build.targets.sdist]\nexclude = [\"*\"]\n",
    )
    .unwrap();
    let files = set(&["a.py", "b.py"]);
    let root = TempDir::new().unwrap();

    let kept = resolve(&BackendRequest::None, &pyproject, &files, root.path()).unwrap();

    assert_eq!(kept, files);
}

#[test]
fn test_explicit_unknown_backend_is_an_error() {
    let pyproject = Pyproject::parse("").unwrap();
    let root = TempDir::new().unwrap();

    let err = resolve(
        &BackendRequest::from("not-a-backend"),
        &pyproject,
        &set(&["a.py"]),
        root.path(),
    )
    .unwrap_err();

    match err {
        Error::UnknownBackend { name, known } => {
            assert_eq!(name, "not-a-backend");
            assert!(known.contains("hatchling.build"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case::unknown("[build-system]\nbuild-backend = \"not-a-backend\"\n")]
#[case::legacy_default("")]
#[case::setuptools("[build-system]\nbuild-backend = \"setuptools.build_meta\"\n")]
fn test_auto_fails_open(#[case] content: &str) {
    let pyproject = Pyproject::parse(content).unwrap();
    let files = set(&["a.py", "docs/index.md"]);
    let root = TempDir::new().unwrap();

    let kept = resolve(&BackendRequest::Auto, &pyproject, &files, root.path()).unwrap();

    assert_eq!(kept, files);
}

#[rstest]
#[case::flit("flit_core.buildapi", "[tool.flit.sdist]\nexclude = [\"docs/*.md\"]\n")]
#[case::pdm("pdm.backend", "[tool.pdm.build]\nexcludes = [\"docs/*.md\"]\n")]
#[case::pdm_api("pdm.backend.api", "[tool.pdm.build]\nexcludes = [\"docs/*.md\"]\n")]
#[case::maturin("maturin", "[tool.maturin]\nexclude = [\"docs/*.md\"]\n")]
#[case::poetry("poetry.core.masonry.api", "[tool.poetry]\nexclude = [\"docs/*.md\"]\n")]
fn test_glob_backends(#[case] backend: &str, #[case] table: &str) {
    let root = TempDir::new().unwrap();
    touch_all(root.path(), &["docs/index.md", "docs/conf.py", "src/a.py"]);
    let pyproject =
        Pyproject::parse(&format!("[build-system]\nbuild-backend = \"{backend}\"\n\n{table}"))
            .unwrap();
    let files = set(&["docs/conf.py", "docs/index.md", "src/a.py"]);

    let kept = resolve(&BackendRequest::Auto, &pyproject, &files, root.path()).unwrap();

    assert_eq!(kept, set(&["docs/conf.py", "src/a.py"]));
}

#[test]
fn test_glob_only_removes_existing_entries() {
    let root = TempDir::new().unwrap();
    touch_all(root.path(), &["present.txt"]);
    let pyproject = Pyproject::parse("[tool.maturin]\nexclude = [\"*.txt\"]\n").unwrap();
    // `deleted.txt` is still tracked but no longer on disk.
    let files = set(&["deleted.txt", "present.txt"]);

    let kept = resolve(&BackendRequest::from("maturin"), &pyproject, &files, root.path()).unwrap();

    assert_eq!(kept, set(&["deleted.txt"]));
}

#[test]
fn test_poetry_format_selection() {
    let root = TempDir::new().unwrap();
    let names = ["plain.txt", "sdist.txt", "wheel.txt", "both.txt", "any.txt"];
    touch_all(root.path(), &names);
    let pyproject = Pyproject::parse(
        r#"
[tool.poetry]
exclude = [
    "plain.txt",
    { path = "sdist.txt", format = "sdist" },
    { path = "wheel.txt", format = "wheel" },
    { path = "both.txt", format = ["wheel", "sdist"] },
    { path = "any.txt" },
]
"#,
    )
    .unwrap();

    let kept = resolve(
        &BackendRequest::from("poetry.core.masonry.api"),
        &pyproject,
        &set(&names),
        root.path(),
    )
    .unwrap();

    assert_eq!(kept, set(&["wheel.txt"]));
}

#[test]
fn test_poetry_does_not_fall_through_to_other_backends() {
    let root = TempDir::new().unwrap();
    touch_all(root.path(), &["a.txt"]);
    let pyproject = Pyproject::parse(
        "[tool.poetry]\nexclude = []\n\n[tool.maturin]\nexclude = [\"a.txt\"]\n",
    )
    .unwrap();

    let kept = resolve(
        &BackendRequest::from("poetry.core.masonry.api"),
        &pyproject,
        &set(&["a.txt"]),
        root.path(),
    )
    .unwrap();

    assert_eq!(kept, set(&["a.txt"]));
}

#[test]
fn test_wrongly_shaped_exclusions() {
    let pyproject = Pyproject::parse(
        "[build-system]\nbuild-backend = \"hatchling.build\"\n\n\
         [tool.hatch.build.targets.sdist]\nexclude = \"docs\"\n",
    )
    .unwrap();
    let root = TempDir::new().unwrap();

    let err = resolve(&BackendRequest::Auto, &pyproject, &set(&["a.py"]), root.path()).unwrap_err();

    assert!(matches!(err, Error::ConfigValue { .. }), "got: {err}");
}

#[test]
fn test_invalid_hatchling_pattern() {
    let pyproject =
        Pyproject::parse("[tool.hatch.build.targets.sdist]\nexclude = [\"[abc\"]\n").unwrap();
    let root = TempDir::new().unwrap();

    let err = resolve(
        &BackendRequest::from("hatchling.build"),
        &pyproject,
        &set(&["a.py"]),
        root.path(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::InvalidPattern { .. }), "got: {err}");
}
