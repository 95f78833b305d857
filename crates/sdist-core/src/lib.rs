//! Reconciliation engine for check-sdist
//!
//! Compares the members of a Python source distribution against the files
//! a project tracks in git, after applying the project's tolerated
//! patterns, the built-in ignore list, and build-backend exclusions.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use sdist_core::{BuildFrontend, check};
//!
//! let frontend = BuildFrontend::new().isolated(false);
//! let outcome = check(Path::new("."), &frontend, Path::new(".")).unwrap();
//! println!("{}", sdist_core::Report::new(&outcome.result));
//! ```

pub mod archive;
pub mod backend;
pub mod build;
pub mod check;
pub mod config;
pub mod error;
pub mod pattern;
pub mod reconcile;
pub mod report;

pub use archive::read_sdist;
pub use backend::{Backend, BackendRequest, resolve};
pub use build::{BuildFrontend, Installer, PrebuiltSdist, SdistSource};
pub use check::{CheckOutcome, check};
pub use config::{Mode, ProjectConfig, Pyproject, Settings};
pub use error::{Error, Result};
pub use pattern::{PatternList, filter, glob_filter};
pub use reconcile::{Reconciler, Reconciliation, reconcile};
pub use report::{Report, Verdict};
