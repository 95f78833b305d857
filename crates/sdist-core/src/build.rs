//! Obtaining the SDist to compare against
//!
//! The usual source is a fresh build through the Python `build` frontend
//! into a temporary directory. A prebuilt archive can stand in for it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use sdist_fs::PathSet;
use tempfile::TempDir;

use crate::archive::read_sdist;
use crate::{Error, Result};

/// Default interpreter used to run the build frontend.
pub const DEFAULT_PYTHON: &str = "python3";

/// Anything that can produce the member list of a project's SDist.
pub trait SdistSource {
    /// SDist members for the project in `source_dir`, relative to the
    /// archive's top-level directory.
    fn sdist_members(&self, source_dir: &Path) -> Result<PathSet>;
}

/// An archive that was already built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrebuiltSdist {
    path: PathBuf,
}

impl PrebuiltSdist {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SdistSource for PrebuiltSdist {
    fn sdist_members(&self, _source_dir: &Path) -> Result<PathSet> {
        read_sdist(&self.path)
    }
}

/// Installer used by `build` for isolated environments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Installer {
    Uv,
    Pip,
    /// `uv` when it is on `PATH`, otherwise `pip`.
    #[default]
    UvOrPip,
}

impl Installer {
    /// Pick a concrete installer, probing for `uv` if needed.
    pub fn resolve(self) -> Self {
        match self {
            Self::UvOrPip if uv_available() => Self::Uv,
            Self::UvOrPip => Self::Pip,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uv => "uv",
            Self::Pip => "pip",
            Self::UvOrPip => "uv|pip",
        }
    }
}

impl fmt::Display for Installer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn uv_available() -> bool {
    Command::new("uv")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Builds the SDist with `<python> -m build --sdist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFrontend {
    python: PathBuf,
    isolated: bool,
    installer: Installer,
}

impl Default for BuildFrontend {
    fn default() -> Self {
        Self {
            python: PathBuf::from(DEFAULT_PYTHON),
            isolated: true,
            installer: Installer::UvOrPip,
        }
    }
}

impl BuildFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn python(mut self, python: impl Into<PathBuf>) -> Self {
        self.python = python.into();
        self
    }

    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }

    pub fn installer(mut self, installer: Installer) -> Self {
        self.installer = installer;
        self
    }

    /// The build command, writing into `outdir`.
    ///
    /// `installer` must already be resolved; it is only passed for isolated
    /// builds.
    pub fn command(&self, source_dir: &Path, outdir: &Path, installer: Installer) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.current_dir(source_dir)
            .args(["-m", "build", "--sdist", "--outdir"])
            .arg(outdir);
        if self.isolated {
            cmd.args(["--installer", installer.as_str()]);
        } else {
            cmd.arg("--no-isolation");
        }
        cmd
    }

    fn run(&self, source_dir: &Path, outdir: &Path) -> Result<()> {
        let installer = if self.isolated {
            self.installer.resolve()
        } else {
            self.installer
        };
        let mut cmd = self.command(source_dir, outdir, installer);
        let described = describe(&cmd);
        tracing::info!(command = %described, "Building SDist");

        // stdout belongs to the report; build chatter goes to stderr.
        let status = cmd
            .stdout(std::io::stderr())
            .status()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::CommandNotFound {
                    command: self.python.display().to_string(),
                },
                _ => Error::io(&self.python, e),
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: described,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl SdistSource for BuildFrontend {
    fn sdist_members(&self, source_dir: &Path) -> Result<PathSet> {
        let outdir = TempDir::new().map_err(|e| Error::io(std::env::temp_dir(), e))?;
        self.run(source_dir, outdir.path())?;
        let archive = single_archive(outdir.path())?;
        read_sdist(&archive)
    }
}

/// The only `*.tar.gz` in `dir`.
pub fn single_archive(dir: &Path) -> Result<PathBuf> {
    let found = sdist_fs::glob::expand(dir, "*.tar.gz")?;
    let mut archives = found.iter();
    match (archives.next(), archives.next()) {
        (Some(archive), None) => Ok(dir.join(archive.to_native())),
        _ => Err(Error::ArchiveCount {
            dir: dir.to_path_buf(),
            found: found.len(),
        }),
    }
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
