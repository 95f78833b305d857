//! `pyproject.toml` loading and the `[tool.check-sdist]` settings table
//!
//! The whole document is kept as a raw TOML table: backend exclusion lists
//! live in tables owned by other tools, and are looked up by dotted path
//! only when the matching backend is selected.

use std::path::Path;

use serde::Deserialize;
use toml::{Table, Value};

use crate::backend::BackendRequest;
use crate::{Error, Result};

/// Project configuration file name, relative to the source directory.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Name of the settings table under `[tool]`.
pub const TOOL_NAME: &str = "check-sdist";

/// Baseline file-listing strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Files tracked by git.
    #[default]
    Git,
    /// Every regular file under the source directory.
    All,
}

/// Settings from `[tool.check-sdist]`.
///
/// Every key is optional. Unknown keys are rejected so that a typo such as
/// `sdists-only` is reported instead of silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Settings {
    /// Patterns tolerated as present only in the SDist.
    pub sdist_only: Vec<String>,
    /// Patterns tolerated as present only in git.
    pub git_only: Vec<String>,
    /// Extend both lists with the built-in ignores.
    pub default_ignore: bool,
    /// List files of initialized submodules too.
    pub recurse_submodules: bool,
    pub mode: Mode,
    pub build_backend: BackendRequest,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sdist_only: Vec::new(),
            git_only: Vec::new(),
            default_ignore: true,
            recurse_submodules: true,
            mode: Mode::Git,
            build_backend: BackendRequest::Auto,
        }
    }
}

/// A parsed `pyproject.toml`.
///
/// A missing file is equivalent to an empty document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pyproject {
    table: Table,
}

impl Pyproject {
    /// Parse `pyproject.toml` content.
    ///
    /// # Example
    ///
    /// ```
    /// use sdist_core::config::Pyproject;
    ///
    /// let pyproject = Pyproject::parse(r#"
    /// [build-system]
    /// build-backend = "hatchling.build"
    /// "#).unwrap();
    ///
    /// assert_eq!(pyproject.build_backend().unwrap(), Some("hatchling.build"));
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_at(content, Path::new(PYPROJECT_FILE))
    }

    /// Load `pyproject.toml` from `source_dir`.
    pub fn load(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(PYPROJECT_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse_at(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No pyproject.toml, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn parse_at(content: &str, path: &Path) -> Result<Self> {
        let table = content.parse::<Table>().map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { table })
    }

    /// Look up a nested value by key path, e.g. `["tool", "flit", "sdist"]`.
    pub fn get(&self, keys: &[&str]) -> Option<&Value> {
        let (first, rest) = keys.split_first()?;
        let mut current = self.table.get(*first)?;
        for key in rest {
            current = current.as_table()?.get(*key)?;
        }
        Some(current)
    }

    /// The declared `build-system.build-backend`, if any.
    pub fn build_backend(&self) -> Result<Option<&str>> {
        match self.get(&["build-system", "build-backend"]) {
            None => Ok(None),
            Some(Value::String(backend)) => Ok(Some(backend)),
            Some(other) => Err(Error::config_value(
                "build-system.build-backend",
                format!("expected a string, found {}", other.type_str()),
            )),
        }
    }

    /// Read `[tool.check-sdist]`; a missing table yields the defaults.
    pub fn settings(&self) -> Result<Settings> {
        match self.get(&["tool", TOOL_NAME]) {
            None => Ok(Settings::default()),
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| Error::InvalidSettings {
                    message: e.message().to_string(),
                }),
        }
    }
}

/// Everything read from the project before comparing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectConfig {
    pub pyproject: Pyproject,
    pub settings: Settings,
}

impl ProjectConfig {
    /// Load and validate the configuration of the project in `source_dir`.
    pub fn load(source_dir: &Path) -> Result<Self> {
        Self::from_pyproject(Pyproject::load(source_dir)?)
    }

    pub fn from_pyproject(pyproject: Pyproject) -> Result<Self> {
        let settings = pyproject.settings()?;
        Ok(Self {
            pyproject,
            settings,
        })
    }
}
