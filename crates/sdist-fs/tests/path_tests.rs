use rstest::rstest;
use sdist_fs::{Error, RelPath};

#[rstest]
#[case("foo/bar/baz", "foo/bar/baz")]
#[case("foo\\bar\\baz", "foo/bar/baz")]
#[case("foo/bar\\baz", "foo/bar/baz")]
#[case("./src/pkg/__init__.py", "src/pkg/__init__.py")]
#[case("a/./b//c", "a/b/c")]
#[case("dir/", "dir")]
fn test_normalization(#[case] input: &str, #[case] expected: &str) {
    let path = RelPath::new(input).unwrap();
    assert_eq!(path.as_str(), expected);
}

#[rstest]
#[case("/etc/passwd")]
#[case("\\server\\share")]
#[case("../outside")]
#[case("a/../../b")]
#[case("")]
#[case("./")]
fn test_rejected_paths(#[case] input: &str) {
    let err = RelPath::new(input).unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }), "unexpected error: {err}");
}

#[test]
fn test_equal_after_normalization() {
    let from_git = RelPath::new("src/pkg/mod.py").unwrap();
    let from_archive = RelPath::new("src\\pkg\\.\\mod.py").unwrap();
    assert_eq!(from_git, from_archive);
}

#[test]
fn test_parent_and_file_name() {
    let path = RelPath::new("src/pkg/mod.py").unwrap();
    assert_eq!(path.file_name(), "mod.py");
    assert_eq!(path.parent().unwrap().as_str(), "src/pkg");
    assert!(RelPath::new("README.md").unwrap().parent().is_none());
}

#[test]
fn test_to_native_returns_pathbuf() {
    let path = RelPath::new("foo/bar").unwrap();
    let native = path.to_native();
    assert!(native.ends_with("bar"));
    assert_eq!(native.components().count(), 2);
}

#[test]
fn test_parse_via_from_str() {
    let path: RelPath = "docs/index.md".parse().unwrap();
    assert_eq!(path.to_string(), "docs/index.md");
}
