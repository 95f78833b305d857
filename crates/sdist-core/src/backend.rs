//! Build-backend exclusion rules
//!
//! Each supported backend declares its SDist exclusions in its own
//! `pyproject.toml` table with its own matching semantics. [`BACKEND_RULES`]
//! maps recognized identifiers to where those lists live and how they match.

use std::fmt;
use std::path::Path;

use sdist_fs::PathSet;
use serde::Deserialize;
use toml::Value;

use crate::config::Pyproject;
use crate::pattern::{filter, glob_filter};
use crate::{Error, Result};

/// Identifier assumed when `build-system.build-backend` is absent.
pub const LEGACY_BACKEND: &str = "setuptools.build_meta:__legacy__";

/// Which backend rules to apply, as requested by configuration or the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BackendRequest {
    /// Read `build-system.build-backend` and fail open on unknown values.
    #[default]
    Auto,
    /// Apply no backend exclusions.
    None,
    /// A specific backend identifier; unknown values are errors.
    Named(String),
}

impl From<String> for BackendRequest {
    fn from(value: String) -> Self {
        match value.as_str() {
            "auto" => Self::Auto,
            "none" => Self::None,
            _ => Self::Named(value),
        }
    }
}

impl From<&str> for BackendRequest {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for BackendRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::None => f.write_str("none"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Backends with known exclusion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Flit,
    Hatchling,
    ScikitBuildCore,
    Pdm,
    Poetry,
    Maturin,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flit => "flit",
            Self::Hatchling => "hatchling",
            Self::ScikitBuildCore => "scikit-build-core",
            Self::Pdm => "pdm",
            Self::Poetry => "poetry",
            Self::Maturin => "maturin",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a backend's exclusion patterns are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Lexical gitignore matching against the path strings.
    GitIgnore,
    /// Filesystem glob expansion relative to the glob root.
    Glob,
}

type Extractor = fn(&Value, &str) -> Result<Vec<String>>;

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct BackendRule {
    pub backend: Backend,
    pub identifiers: &'static [&'static str],
    pub exclude_key: &'static [&'static str],
    pub mode: FilterMode,
    extract: Extractor,
}

impl BackendRule {
    /// Dotted form of the exclusion key, for messages.
    pub fn exclude_key_display(&self) -> String {
        self.exclude_key.join(".")
    }

    /// The exclusion patterns configured in `pyproject`; empty when unset.
    pub fn patterns(&self, pyproject: &Pyproject) -> Result<Vec<String>> {
        match pyproject.get(self.exclude_key) {
            None => Ok(Vec::new()),
            Some(value) => (self.extract)(value, &self.exclude_key_display()),
        }
    }

    /// Remove this backend's exclusions from `files`.
    pub fn apply(&self, pyproject: &Pyproject, files: &PathSet, glob_root: &Path) -> Result<PathSet> {
        let patterns = self.patterns(pyproject)?;
        tracing::debug!(
            backend = %self.backend,
            patterns = patterns.len(),
            "Applying backend exclusions"
        );
        match self.mode {
            FilterMode::GitIgnore => filter(&patterns, files),
            FilterMode::Glob => glob_filter(&patterns, files, glob_root),
        }
    }
}

pub const BACKEND_RULES: &[BackendRule] = &[
    BackendRule {
        backend: Backend::Flit,
        identifiers: &["flit_core.buildapi"],
        exclude_key: &["tool", "flit", "sdist", "exclude"],
        mode: FilterMode::Glob,
        extract: string_list,
    },
    BackendRule {
        backend: Backend::Hatchling,
        identifiers: &["hatchling.build"],
        exclude_key: &["tool", "hatch", "build", "targets", "sdist", "exclude"],
        mode: FilterMode::GitIgnore,
        extract: string_list,
    },
    BackendRule {
        backend: Backend::ScikitBuildCore,
        identifiers: &["scikit_build_core.build"],
        exclude_key: &["tool", "scikit-build", "sdist", "exclude"],
        mode: FilterMode::GitIgnore,
        extract: string_list,
    },
    BackendRule {
        backend: Backend::Pdm,
        identifiers: &["pdm.backend", "pdm.backend.api"],
        exclude_key: &["tool", "pdm", "build", "excludes"],
        mode: FilterMode::Glob,
        extract: string_list,
    },
    BackendRule {
        backend: Backend::Poetry,
        identifiers: &["poetry.core.masonry.api"],
        exclude_key: &["tool", "poetry", "exclude"],
        mode: FilterMode::Glob,
        extract: poetry_sdist_list,
    },
    BackendRule {
        backend: Backend::Maturin,
        identifiers: &["maturin"],
        exclude_key: &["tool", "maturin", "exclude"],
        mode: FilterMode::Glob,
        extract: string_list,
    },
];

/// Find the rule for a build-backend identifier.
pub fn rule_for(identifier: &str) -> Option<&'static BackendRule> {
    BACKEND_RULES
        .iter()
        .find(|rule| rule.identifiers.contains(&identifier))
}

/// All recognized identifiers, comma separated.
pub fn known_identifiers() -> String {
    BACKEND_RULES
        .iter()
        .flat_map(|rule| rule.identifiers.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn type_error(key: &str, expected: &str, found: &Value) -> Error {
    Error::config_value(
        key,
        format!("expected {expected}, found {}", found.type_str()),
    )
}

fn string_list(value: &Value, key: &str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| type_error(key, "an array of strings", value))?;
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(type_error(key, "a string", other)),
        })
        .collect()
}

/// Poetry entries are plain strings or `{ path, format }` tables, where
/// `format` is a string or list of strings. Only entries that apply to the
/// SDist are returned.
fn poetry_sdist_list(value: &Value, key: &str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| type_error(key, "an array", value))?;

    let mut patterns = Vec::new();
    for item in items {
        match item {
            Value::String(s) => patterns.push(s.clone()),
            Value::Table(table) => {
                let path = match table.get("path") {
                    Some(Value::String(path)) => path,
                    Some(other) => return Err(type_error(key, "a string path", other)),
                    None => return Err(Error::config_value(key, "entry is missing 'path'")),
                };
                if poetry_format_includes_sdist(table.get("format"), key)? {
                    patterns.push(path.clone());
                }
            }
            other => return Err(type_error(key, "a string or table", other)),
        }
    }
    Ok(patterns)
}

fn poetry_format_includes_sdist(format: Option<&Value>, key: &str) -> Result<bool> {
    match format {
        None => Ok(true),
        Some(Value::String(format)) => Ok(format == "sdist"),
        Some(Value::Array(formats)) => {
            for format in formats {
                match format {
                    Value::String(f) if f == "sdist" => return Ok(true),
                    Value::String(_) => {}
                    other => return Err(type_error(key, "a string format", other)),
                }
            }
            Ok(false)
        }
        Some(other) => Err(type_error(key, "a string or array format", other)),
    }
}

/// Remove backend-declared exclusions from `files`.
///
/// `glob_root` anchors glob-mode backends and is normally the current
/// working directory.
pub fn resolve(
    request: &BackendRequest,
    pyproject: &Pyproject,
    files: &PathSet,
    glob_root: &Path,
) -> Result<PathSet> {
    let (identifier, explicit) = match request {
        BackendRequest::None => return Ok(files.clone()),
        BackendRequest::Auto => (pyproject.build_backend()?.unwrap_or(LEGACY_BACKEND), false),
        BackendRequest::Named(name) => (name.as_str(), true),
    };

    match rule_for(identifier) {
        Some(rule) => rule.apply(pyproject, files, glob_root),
        None if explicit => Err(Error::UnknownBackend {
            name: identifier.to_string(),
            known: known_identifiers(),
        }),
        None => {
            tracing::debug!(backend = identifier, "No exclusion rules for backend");
            Ok(files.clone())
        }
    }
}
