//! `.tar.gz` SDist fixtures.

use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};

/// One member of a fixture archive, named exactly as it appears in the tar.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    File(&'a str, &'a str),
    Dir(&'a str),
    Symlink(&'a str, &'a str),
}

/// Write a gzip-compressed tarball containing exactly `members`.
///
/// # Panics
/// Panics if the archive cannot be written.
pub fn write_tar_gz(path: &Path, members: &[Member<'_>]) {
    let file = File::create(path)
        .unwrap_or_else(|e| panic!("write_tar_gz: failed to create {}: {e}", path.display()));
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));

    for member in members {
        let mut header = Header::new_gnu();
        header.set_mtime(0);
        match member {
            Member::File(name, content) => {
                header.set_entry_type(EntryType::Regular);
                header.set_mode(0o644);
                header.set_size(content.len() as u64);
                builder
                    .append_data(&mut header, name, content.as_bytes())
                    .unwrap_or_else(|e| panic!("write_tar_gz: failed to append {name}: {e}"));
            }
            Member::Dir(name) => {
                header.set_entry_type(EntryType::Directory);
                header.set_mode(0o755);
                header.set_size(0);
                builder
                    .append_data(&mut header, name, std::io::empty())
                    .unwrap_or_else(|e| panic!("write_tar_gz: failed to append {name}: {e}"));
            }
            Member::Symlink(name, target) => {
                header.set_entry_type(EntryType::Symlink);
                header.set_mode(0o777);
                header.set_size(0);
                builder
                    .append_link(&mut header, name, target)
                    .unwrap_or_else(|e| panic!("write_tar_gz: failed to append {name}: {e}"));
            }
        }
    }

    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .unwrap_or_else(|e| panic!("write_tar_gz: failed to finish {}: {e}", path.display()));
}

/// Write a well-formed SDist: every file lives under `prefix/`, and a
/// `PKG-INFO` metadata file is added the way build backends do.
///
/// # Panics
/// Panics if the archive cannot be written.
pub fn write_sdist(path: &Path, prefix: &str, files: &[&str]) {
    let names: Vec<String> = files.iter().map(|f| format!("{prefix}/{f}")).collect();
    let pkg_info = format!("{prefix}/PKG-INFO");

    let mut members = vec![Member::Dir(prefix)];
    members.extend(names.iter().map(|n| Member::File(n, "")));
    members.push(Member::File(&pkg_info, "Metadata-Version: 2.1\n"));

    write_tar_gz(path, &members);
}
