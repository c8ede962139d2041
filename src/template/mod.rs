//! Template archives.
//!
//! The template ships as a gzip-compressed tarball with a single synthetic
//! top-level directory. `pack` produces that layout from a source tree;
//! `extract` strips the top-level directory and refuses link entries and
//! entries that would escape the target.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::core::error::ExtractionError;

/// Synthetic top-level directory inside packed archives.
const ARCHIVE_ROOT: &str = "template";

/// Unpack a template archive into `target`, creating it if needed.
pub fn extract(package: &Path, target: &Path) -> Result<(), ExtractionError> {
    std::fs::create_dir_all(target).map_err(|e| ExtractionError::WriteTarget {
        path: target.to_path_buf(),
        source: e,
    })?;

    let read_err = |source: std::io::Error| ExtractionError::ReadArchive {
        path: package.to_path_buf(),
        source,
    };

    let file = File::open(package).map_err(read_err)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    for entry in archive.entries().map_err(read_err)? {
        let mut entry = entry.map_err(read_err)?;
        let raw_path = entry
            .path()
            .map_err(|e| ExtractionError::BadEntry {
                entry: String::from_utf8_lossy(&entry.path_bytes()).into_owned(),
                reason: e.to_string(),
            })?
            .into_owned();

        // Templates hold plain files and directories; a link entry could
        // point outside the target and have later entries written through it.
        let kind = entry.header().entry_type();
        if kind.is_symlink() || kind.is_hard_link() {
            return Err(ExtractionError::BadEntry {
                entry: raw_path.display().to_string(),
                reason: "link entries are not allowed".to_string(),
            });
        }

        let Some(stripped) = strip_archive_root(&raw_path) else {
            continue;
        };
        if !is_safe_relative(&stripped) {
            return Err(ExtractionError::BadEntry {
                entry: raw_path.display().to_string(),
                reason: "escapes the target directory".to_string(),
            });
        }

        let dest = target.join(&stripped);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ExtractionError::WriteTarget {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        entry.unpack(&dest).map_err(|e| ExtractionError::WriteTarget {
            path: dest.clone(),
            source: e,
        })?;
    }
    Ok(())
}

/// Pack a template source directory into a shippable archive.
pub fn pack(source: &Path, output: &Path) -> Result<(), ExtractionError> {
    let pack_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ExtractionError::Pack { path, source }
    };

    let file = File::create(output).map_err(pack_err(output))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    builder
        .append_dir_all(ARCHIVE_ROOT, source)
        .map_err(pack_err(source))?;
    let encoder = builder.into_inner().map_err(pack_err(output))?;
    encoder.finish().map_err(pack_err(output))?;
    Ok(())
}

/// Drop the archive's top-level directory from an entry path. Returns None
/// for the top-level entry itself.
fn strip_archive_root(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;
    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        None
    } else {
        Some(rest.to_path_buf())
    }
}

/// True when every component is a plain name — no roots, prefixes, or `..`.
fn is_safe_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
}
