//! Reading SDist member lists from `.tar.gz` archives

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use sdist_fs::{PathSet, RelPath};
use tar::Archive;

use crate::{Error, Result};

/// A raw tar entry name and whether it is listed as an SDist member.
///
/// Only regular files and symlinks are members, but every entry takes part
/// in the single-root check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_member: bool,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_member: true,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_member: false,
        }
    }
}

/// List the members of the SDist at `path`, relative to its top-level
/// directory.
pub fn read_sdist(path: &Path) -> Result<PathSet> {
    let read_err = |source: std::io::Error| Error::ArchiveRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let mut entries = Vec::new();
    for entry in archive.entries().map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let entry_type = entry.header().entry_type();
        // Extension headers describe other entries and are not members.
        if entry_type.is_pax_global_extensions()
            || entry_type.is_pax_local_extensions()
            || entry_type.is_gnu_longname()
            || entry_type.is_gnu_longlink()
        {
            continue;
        }
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        entries.push(ArchiveEntry {
            name,
            is_member: entry_type.is_file() || entry_type.is_symlink(),
        });
    }

    let members = strip_common_root(&entries)?;
    tracing::debug!(
        archive = %path.display(),
        members = members.len(),
        "Read SDist"
    );
    Ok(members)
}

/// Strip the single top-level directory shared by every entry.
///
/// Fails with [`Error::ArchiveMalformed`] unless exactly one top-level
/// prefix exists and every member lives beneath it.
pub fn strip_common_root(entries: &[ArchiveEntry]) -> Result<PathSet> {
    let mut prefixes = BTreeSet::new();
    let mut members = Vec::new();

    for entry in entries {
        let name = entry.name.trim_start_matches("./").trim_end_matches('/');
        if name.is_empty() || name == "." {
            continue;
        }
        let (prefix, rest) = match name.split_once('/') {
            Some((prefix, rest)) => (prefix, Some(rest)),
            None => (name, None),
        };
        prefixes.insert(prefix.to_string());
        if entry.is_member {
            members.push((prefix, rest));
        }
    }

    if prefixes.len() != 1 {
        return Err(Error::ArchiveMalformed {
            prefixes: prefixes.into_iter().collect(),
        });
    }

    let mut paths = PathSet::new();
    for (prefix, rest) in members {
        let rest = rest.ok_or_else(|| Error::ArchiveMalformed {
            prefixes: vec![prefix.to_string()],
        })?;
        paths.insert(RelPath::new(rest)?);
    }
    Ok(paths)
}
