//! Variant materializer.
//!
//! Some backend differences cannot be expressed as text substitution: whole
//! files differ between the classic and nova renditions. The template ships
//! both, tagging the nova file with a `.nova` marker before its extension
//! (`backend.nova.js` beside `backend.js`). After substitution has finished,
//! this pass promotes or removes the marked files so exactly one rendition
//! survives.

use std::path::{Path, PathBuf};

use super::error::MaterializationError;
use super::params::Backend;

/// Marker that tags a file as the nova rendition of its unmarked sibling.
pub const VARIANT_MARKER: &str = ".nova";

/// Bring the tree under `root` in line with the selected backend.
///
/// Nova promotes each marked file over its counterpart; classic removes the
/// marked file. The promotion is a single rename, so the marked file and its
/// counterpart can never be observed half-swapped. Must run after
/// substitution: renames may land on files the engine just rewrote.
pub fn materialize(root: &Path, backend: Backend) -> Result<(), MaterializationError> {
    for path in variant_files(root)? {
        match backend {
            Backend::Nova => promote(&path)?,
            Backend::Classic => {
                std::fs::remove_file(&path).map_err(|e| MaterializationError::Remove {
                    path: path.clone(),
                    source: e,
                })?;
            }
        }
    }
    Ok(())
}

/// All variant-marked files under `root`, in stable alphabetical order.
fn variant_files(root: &Path) -> Result<Vec<PathBuf>, MaterializationError> {
    let scan_err = |reason: String| MaterializationError::Scan {
        root: root.to_path_buf(),
        reason,
    };

    let root_str = root
        .to_str()
        .ok_or_else(|| scan_err("root path is not valid UTF-8".to_string()))?;
    let pattern = format!(
        "{}/**/*{}.*",
        glob::Pattern::escape(root_str),
        VARIANT_MARKER
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).map_err(|e| scan_err(e.to_string()))? {
        let path = entry.map_err(|e| scan_err(e.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Rename a marked file over its unmarked counterpart.
fn promote(path: &Path) -> Result<(), MaterializationError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MaterializationError::BadName {
            path: path.to_path_buf(),
        })?;
    let counterpart = path.with_file_name(file_name.replacen(VARIANT_MARKER, "", 1));

    std::fs::rename(path, &counterpart).map_err(|e| MaterializationError::Promote {
        from: path.to_path_buf(),
        to: counterpart.clone(),
        source: e,
    })
}
