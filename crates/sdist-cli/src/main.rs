//! check-sdist CLI
//!
//! Builds (or reads) a project's SDist and compares its members with the
//! files git tracks.

mod cli;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use sdist_core::{BuildFrontend, PrebuiltSdist, Report, SdistSource, Verdict, check};

use cli::Cli;
use error::{CliError, Result};

/// Exit status for runtime errors, outside the verdict bitmask.
const ERROR_EXIT_CODE: u8 = 4;

fn main() -> ExitCode {
    match run() {
        Ok(verdict) => verdict.into(),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

fn run() -> Result<Verdict> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }

    if !cli.source_dir.is_dir() {
        return Err(CliError::user(format!(
            "source directory does not exist: {}",
            cli.source_dir.display()
        )));
    }
    let glob_root = std::env::current_dir()?;
    tracing::debug!(
        source_dir = %cli.source_dir.display(),
        prebuilt = cli.sdist.is_some(),
        "Checking SDist"
    );

    // Injected files are removed again when the guard drops.
    let junk = cli
        .inject_junk
        .then(|| sdist_fs::inject_junk_files(&cli.source_dir))
        .transpose()?;

    let source: Box<dyn SdistSource> = match &cli.sdist {
        Some(archive) => Box::new(PrebuiltSdist::new(archive)),
        None => Box::new(
            BuildFrontend::new()
                .python(&cli.python)
                .isolated(!cli.no_isolation)
                .installer(cli.installer.into()),
        ),
    };

    let outcome = check(&cli.source_dir, &*source, &glob_root)?;

    let mut report = Report::new(&outcome.result);
    if cli.verbose {
        report = report.with_contents(&outcome.sdist);
    }
    print!("{report}");

    if let Some(junk) = junk {
        junk.restore()?;
    }

    Ok(outcome.verdict())
}
