//! Error types for sdist-core

use std::path::PathBuf;

/// Result type for sdist-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sdist-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown backend: {name} - known backends are: {known}")]
    UnknownBackend { name: String, known: String },

    #[error("Malformed SDist, expected a single top-level directory but found: {}", prefixes.join(", "))]
    ArchiveMalformed { prefixes: Vec<String> },

    #[error("Expected exactly one SDist in {}, found {found}", dir.display())]
    ArchiveCount { dir: PathBuf, found: usize },

    #[error("Failed to read SDist {}: {source}", path.display())]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid [tool.check-sdist] settings: {message}")]
    InvalidSettings { message: String },

    #[error("Invalid value for {key}: {message}")]
    ConfigValue { key: String, message: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Command failed with {status}: {command}")]
    CommandFailed { command: String, status: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    Fs(#[from] sdist_fs::Error),

    #[error("Git error: {0}")]
    Git(#[from] sdist_git::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
