//! Error types for sdist-fs

use std::path::PathBuf;

/// Result type for sdist-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sdist-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid relative path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    GlobPattern { pattern: String, message: String },

    #[error("Directory walk failed under {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
