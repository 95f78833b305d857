//! Git file listing for check-sdist
//!
//! Reads the git index directly instead of shelling out to `git ls-files`.

pub mod error;
pub mod tracked;

pub use error::{Error, Result};
pub use tracked::tracked_files;
