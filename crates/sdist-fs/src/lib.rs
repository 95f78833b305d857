//! Filesystem layer for check-sdist
//!
//! Provides normalized relative paths, ordered path sets, and the few
//! filesystem operations the comparison needs: glob expansion, full
//! directory walks, and temporary junk-file injection.

pub mod error;
pub mod glob;
pub mod inject;
pub mod path;
pub mod pathset;
pub mod walk;

pub use error::{Error, Result};
pub use inject::{InjectedFiles, JUNK_FILES, inject_files, inject_junk_files};
pub use path::RelPath;
pub use pathset::PathSet;
