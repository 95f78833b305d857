use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use sdist_fs::{inject_files, inject_junk_files};
use tempfile::TempDir;

fn names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_inject_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    {
        let _guard = inject_files(root, &["a", "b", "c/", "d/e", "f/g/"]).unwrap();
        assert_eq!(
            names(root),
            ["a", "b", "c", "d", "f"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<_>>()
        );
        assert!(root.join("a").is_file());
        assert!(root.join("c").is_dir());
        assert!(root.join("c/junk.py").is_file());
        assert!(root.join("d/e").is_file());
        assert!(root.join("f/g").is_dir());
    }

    assert!(names(root).is_empty());
}

#[test]
fn test_inject_junk_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    {
        let _guard = inject_junk_files(root).unwrap();
        assert!(root.join(".tox").is_dir());
        assert!(root.join("tests").is_dir());
        assert!(root.join("__pycache__").is_dir());
        assert!(root.join("tests/__pycache__").is_dir());
        assert!(root.join(".coverage").is_file());
    }

    assert!(names(root).is_empty());
}

#[test]
fn test_inject_junk_files_keeps_existing_dirs() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("tests/simple")).unwrap();

    {
        let _guard = inject_junk_files(root).unwrap();
        assert!(root.join(".tox").is_dir());
        assert!(root.join("tests/simple").is_dir());
        assert!(root.join("tests/__pycache__").is_dir());
    }

    assert_eq!(names(root), BTreeSet::from(["tests".to_string()]));
    assert_eq!(names(&root.join("tests")), BTreeSet::from(["simple".to_string()]));
    assert!(names(&root.join("tests/simple")).is_empty());
}

#[test]
fn test_existing_file_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join(".coverage"), "real data").unwrap();

    let guard = inject_files(root, &[".coverage", "extra"]).unwrap();
    assert_eq!(guard.files().len(), 1);
    guard.restore().unwrap();

    assert_eq!(fs::read_to_string(root.join(".coverage")).unwrap(), "real data");
    assert!(!root.join("extra").exists());
}
