//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sdist_core::Installer;
use sdist_core::build::DEFAULT_PYTHON;

/// Check that an SDist contains the files tracked by git
///
/// Exit status is 0 when the SDist matches, plus 1 when it has files git
/// does not track, plus 2 when it misses tracked files. Errors exit with 4.
#[derive(Parser, Debug)]
#[command(name = "check-sdist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The source directory to check
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Do not build the SDist in an isolated environment
    #[arg(long)]
    pub no_isolation: bool,

    /// Temporarily inject common junk files into the source directory
    #[arg(long)]
    pub inject_junk: bool,

    /// Print out SDist contents too
    #[arg(short, long)]
    pub verbose: bool,

    /// Installer `build` uses for isolated environments
    #[arg(long, value_enum, default_value_t = InstallerArg::UvOrPip)]
    pub installer: InstallerArg,

    /// Python interpreter used to run `build`
    #[arg(long, env = "CHECK_SDIST_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: PathBuf,

    /// Compare this prebuilt .tar.gz instead of building one
    #[arg(long, value_name = "ARCHIVE")]
    pub sdist: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstallerArg {
    Uv,
    Pip,
    #[value(name = "uv|pip")]
    UvOrPip,
}

impl From<InstallerArg> for Installer {
    fn from(arg: InstallerArg) -> Self {
        match arg {
            InstallerArg::Uv => Installer::Uv,
            InstallerArg::Pip => Installer::Pip,
            InstallerArg::UvOrPip => Installer::UvOrPip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["check-sdist"]).unwrap();
        assert_eq!(cli.source_dir, PathBuf::from("."));
        assert!(!cli.no_isolation);
        assert!(!cli.inject_junk);
        assert!(!cli.verbose);
        assert_eq!(cli.installer, InstallerArg::UvOrPip);
        assert!(cli.sdist.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "check-sdist",
            "--source-dir",
            "python",
            "--no-isolation",
            "--inject-junk",
            "-v",
            "--installer",
            "pip",
            "--python",
            "/opt/py/bin/python",
            "--sdist",
            "dist/demo-1.0.tar.gz",
        ])
        .unwrap();
        assert_eq!(cli.source_dir, PathBuf::from("python"));
        assert!(cli.no_isolation);
        assert!(cli.inject_junk);
        assert!(cli.verbose);
        assert_eq!(cli.installer, InstallerArg::Pip);
        assert_eq!(cli.python, PathBuf::from("/opt/py/bin/python"));
        assert_eq!(cli.sdist, Some(PathBuf::from("dist/demo-1.0.tar.gz")));
    }

    #[test]
    fn test_installer_either() {
        let cli = Cli::try_parse_from(["check-sdist", "--installer", "uv|pip"]).unwrap();
        assert_eq!(Installer::from(cli.installer), Installer::UvOrPip);
    }

    #[test]
    fn test_unknown_installer_rejected() {
        assert!(Cli::try_parse_from(["check-sdist", "--installer", "conda"]).is_err());
    }
}
