//! Set reconciliation between SDist members and the baseline file list

use std::path::{Path, PathBuf};

use sdist_fs::PathSet;

use crate::backend;
use crate::config::ProjectConfig;
use crate::pattern::PatternList;
use crate::report::Verdict;
use crate::Result;

/// Core metadata file every SDist carries and no repository tracks.
pub const METADATA_FILE: &str = "PKG-INFO";

/// Tolerated SDist-only pattern added by `default-ignore`.
pub const DIST_INFO_PATTERN: &str = "*.dist-info";

const DEFAULT_IGNORE: &str = include_str!("../resources/default-ignore.txt");

/// The built-in `git-only` patterns added by `default-ignore`.
pub fn default_ignore_patterns() -> impl Iterator<Item = &'static str> {
    DEFAULT_IGNORE.lines()
}

/// Files left unexplained on either side after filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// In the SDist but not in the baseline.
    pub sdist_only: PathSet,
    /// In the baseline but not in the SDist.
    pub git_only: PathSet,
}

impl Reconciliation {
    pub fn is_match(&self) -> bool {
        self.sdist_only.is_empty() && self.git_only.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_sides(!self.sdist_only.is_empty(), !self.git_only.is_empty())
    }
}

/// Applies a project's configuration to a pair of file sets.
#[derive(Debug)]
pub struct Reconciler<'a> {
    config: &'a ProjectConfig,
    glob_root: PathBuf,
}

impl<'a> Reconciler<'a> {
    /// `glob_root` anchors glob-mode backend exclusions.
    pub fn new(config: &'a ProjectConfig, glob_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            glob_root: glob_root.into(),
        }
    }

    pub fn glob_root(&self) -> &Path {
        &self.glob_root
    }

    fn sdist_only_patterns(&self) -> Result<PatternList> {
        let settings = &self.config.settings;
        let defaults = settings
            .default_ignore
            .then_some(DIST_INFO_PATTERN)
            .into_iter();
        PatternList::new(settings.sdist_only.iter().map(String::as_str).chain(defaults))
    }

    fn git_only_patterns(&self) -> Result<PatternList> {
        let settings = &self.config.settings;
        let defaults = settings
            .default_ignore
            .then(default_ignore_patterns)
            .into_iter()
            .flatten()
            .map(|p| -> &str { p });
        PatternList::new(settings.git_only.iter().map(String::as_str).chain(defaults))
    }

    /// Classify the differences between `sdist` and `tracked`.
    pub fn reconcile(&self, sdist: &PathSet, tracked: &PathSet) -> Result<Reconciliation> {
        let mut sdist = sdist.clone();
        sdist.remove(METADATA_FILE);

        let sdist_only_raw = sdist.difference(tracked);
        let git_only_raw = tracked.difference(&sdist);
        tracing::debug!(
            sdist_only = sdist_only_raw.len(),
            git_only = git_only_raw.len(),
            "Raw differences"
        );

        let sdist_only = self.sdist_only_patterns()?.filter(&sdist_only_raw);
        let git_only = self.git_only_patterns()?.filter(&git_only_raw);
        let git_only = backend::resolve(
            &self.config.settings.build_backend,
            &self.config.pyproject,
            &git_only,
            &self.glob_root,
        )?;

        Ok(Reconciliation {
            sdist_only,
            git_only,
        })
    }
}

/// Reconcile with `glob_root` anchoring glob-mode exclusions.
pub fn reconcile(
    config: &ProjectConfig,
    sdist: &PathSet,
    tracked: &PathSet,
    glob_root: &Path,
) -> Result<Reconciliation> {
    Reconciler::new(config, glob_root).reconcile(sdist, tracked)
}
