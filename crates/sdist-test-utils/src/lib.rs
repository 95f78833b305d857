//! Shared test utilities for the check-sdist workspace.
//!
//! Fixtures used by more than one crate's test suite live here. This crate
//! is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`git`]: git repositories with staged files, optionally committed
//! - [`project`]: [`TestProject`] builder for a Python project checkout
//! - [`archive`]: `.tar.gz` SDist writer

pub mod archive;
pub mod git;
pub mod project;

pub use project::TestProject;
