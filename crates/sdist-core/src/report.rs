//! Verdicts, exit codes, and the console report

use std::fmt;
use std::process::ExitCode;

use sdist_fs::PathSet;

use crate::reconcile::Reconciliation;

/// Outcome of a comparison, encoded as a bitmask exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Verdict {
    Match = 0,
    SdistOnly = 1,
    GitOnly = 2,
    Both = 3,
}

impl Verdict {
    pub fn from_sides(sdist_only: bool, git_only: bool) -> Self {
        match (sdist_only, git_only) {
            (false, false) => Self::Match,
            (true, false) => Self::SdistOnly,
            (false, true) => Self::GitOnly,
            (true, true) => Self::Both,
        }
    }

    /// Process exit code: `+1` for SDist-only files, `+2` for git-only files.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

impl From<Verdict> for ExitCode {
    fn from(verdict: Verdict) -> Self {
        ExitCode::from(verdict.code())
    }
}

/// Human-readable rendering of a reconciliation.
///
/// Formatting with `{}` produces the exact text written to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    result: &'a Reconciliation,
    contents: Option<&'a PathSet>,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a Reconciliation) -> Self {
        Self {
            result,
            contents: None,
        }
    }

    /// Also list every SDist member before the verdict.
    pub fn with_contents(mut self, sdist: &'a PathSet) -> Self {
        self.contents = Some(sdist);
        self
    }

    pub fn verdict(&self) -> Verdict {
        self.result.verdict()
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, paths: &PathSet) -> fmt::Result {
    writeln!(f, "{title}")?;
    for path in paths {
        writeln!(f, "  {path}")?;
    }
    writeln!(f)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(contents) = self.contents {
            write_section(f, "SDist contents:", contents)?;
        }

        if self.result.is_match() {
            return writeln!(f, "SDist matches git");
        }

        writeln!(f, "SDist does not match git")?;
        writeln!(f)?;
        write_section(f, "SDist only:", &self.result.sdist_only)?;
        write_section(f, "Git only:", &self.result.git_only)
    }
}
