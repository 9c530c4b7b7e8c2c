//! Which paths the app accepts into the file list.
//!
//! - Only the four supported extensions are kept.
//! - Dropped folders are expanded one level (no recursive walk).
//! - Paths already in the list are skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::types::AudioFormat;

pub fn is_supported(path: &Path) -> bool {
    AudioFormat::from_path(path).is_some()
}

/// Keep supported files that are not in `existing`, preserving input order.
/// Duplicates inside `candidates` are dropped too.
pub fn filter_new_paths(candidates: Vec<PathBuf>, existing: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = existing.iter().cloned().collect();
    let mut out = Vec::with_capacity(candidates.len());

    for path in candidates {
        if is_supported(&path) && seen.insert(path.clone()) {
            out.push(path);
        }
    }

    out
}

/// Supported files directly inside `dir`, sorted by path.
pub fn supported_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_supported(&path) {
            out.push(path);
        }
    }

    out.sort();
    Ok(out)
}

/// Turn dropped/picked paths into candidate files: folders expand one level,
/// files pass through. Unreadable folders are skipped with a warning.
pub fn expand_dropped(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();

    for path in paths {
        if path.is_dir() {
            match supported_files_in(&path) {
                Ok(files) => out.extend(files),
                Err(e) => tracing::warn!(error = %e, "skipping dropped folder"),
            }
        } else {
            out.push(path);
        }
    }

    out
}
