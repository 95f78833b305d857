//! Error types for sdist-git

use std::path::PathBuf;

/// Result type for sdist-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sdist-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] sdist_fs::Error),

    #[error("{} is not inside a git repository: {source}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Repository at {} has no working directory", path.display())]
    BareRepository { path: PathBuf },

    #[error("{} is outside the repository working directory {}", path.display(), workdir.display())]
    OutsideWorkdir { path: PathBuf, workdir: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
