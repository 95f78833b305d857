//! End-to-end comparison of one project

use std::path::Path;

use sdist_fs::PathSet;

use crate::Result;
use crate::build::SdistSource;
use crate::config::{Mode, ProjectConfig, Settings};
use crate::reconcile::{Reconciler, Reconciliation};
use crate::report::Verdict;

/// Everything produced by a [`check`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Every SDist member, as read from the archive.
    pub sdist: PathSet,
    pub result: Reconciliation,
}

impl CheckOutcome {
    pub fn verdict(&self) -> Verdict {
        self.result.verdict()
    }
}

/// The baseline file list for `source_dir` under `settings.mode`.
pub fn baseline_files(source_dir: &Path, settings: &Settings) -> Result<PathSet> {
    let files = match settings.mode {
        Mode::Git => sdist_git::tracked_files(source_dir, settings.recurse_submodules)?,
        Mode::All => sdist_fs::walk::all_files(source_dir)?,
    };
    tracing::debug!(mode = ?settings.mode, files = files.len(), "Listed baseline files");
    Ok(files)
}

/// Compare the SDist from `source` with the baseline of `source_dir`.
///
/// Configuration is loaded and validated before anything is built, so a
/// bad `[tool.check-sdist]` table fails fast.
pub fn check(source_dir: &Path, source: &dyn SdistSource, glob_root: &Path) -> Result<CheckOutcome> {
    let config = ProjectConfig::load(source_dir)?;
    let sdist = source.sdist_members(source_dir)?;
    let baseline = baseline_files(source_dir, &config.settings)?;
    let result = Reconciler::new(&config, glob_root).reconcile(&sdist, &baseline)?;
    Ok(CheckOutcome { sdist, result })
}
