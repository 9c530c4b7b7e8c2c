//! Multi-file jobs run on the worker thread.
//!
//! Every job:
//! - reports progress after each file
//! - checks the stop flag before each file (remaining files are skipped)
//! - records per-file failures and keeps going

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::musicbrainz::{Release, release_edits};

use super::cover::resize_cover;
use super::error::Result;
use super::rename::{plan_rename, rename_file};
use super::tags;
use super::types::{CoverArt, TagEdit, TrackRow};

pub type Progress<'a> = &'a mut dyn FnMut(usize, usize);

#[derive(Debug, Default)]
pub struct LoadReport {
    pub rows: Vec<TrackRow>,
    pub errors: Vec<String>,
    pub stopped: bool,
}

#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: usize,
    pub total: usize,
    pub errors: Vec<String>,
    /// Rows re-read from disk after a successful write.
    pub rows: Vec<TrackRow>,
    pub stopped: bool,
}

#[derive(Debug, Default)]
pub struct RenameReport {
    /// (old path, row at the new path). Rows are marked modified.
    pub renamed: Vec<(PathBuf, TrackRow)>,
    pub unchanged: usize,
    pub errors: Vec<String>,
    pub stopped: bool,
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn load_files(paths: Vec<PathBuf>, progress: Progress<'_>, stop: &AtomicBool) -> LoadReport {
    let total = paths.len();
    let mut report = LoadReport {
        rows: Vec::with_capacity(total),
        ..Default::default()
    };

    for (i, path) in paths.into_iter().enumerate() {
        if stop.load(Ordering::Relaxed) {
            report.stopped = true;
            break;
        }

        let label = file_label(&path);
        match tags::read_track(path) {
            Ok(row) => report.rows.push(row),
            Err(e) => {
                tracing::warn!(file = %label, error = %e, "load failed");
                report.errors.push(format!("{label}: {e}"));
            }
        }
        progress(i + 1, total);
    }

    report
}

/// Write each (path, edit) pair. Files are independent: one failure does not
/// stop the others.
pub fn save_edits(
    jobs: Vec<(PathBuf, TagEdit)>,
    progress: Progress<'_>,
    stop: &AtomicBool,
) -> SaveReport {
    let total = jobs.len();
    let mut report = SaveReport {
        total,
        ..Default::default()
    };

    for (i, (path, edit)) in jobs.into_iter().enumerate() {
        if stop.load(Ordering::Relaxed) {
            report.stopped = true;
            break;
        }

        let label = file_label(&path);
        match tags::write_edit(&path, &edit) {
            Ok(()) => {
                tracing::debug!(file = %label, "saved");
                report.saved += 1;
                match tags::read_track(path) {
                    Ok(mut row) => {
                        row.dirty = true;
                        report.rows.push(row);
                    }
                    Err(e) => tracing::warn!(file = %label, error = %e, "re-read after save failed"),
                }
            }
            Err(e) => {
                tracing::warn!(file = %label, error = %e, "save failed");
                report.errors.push(format!("{label}: {e}"));
            }
        }
        progress(i + 1, total);
    }

    tracing::info!(saved = report.saved, total, errors = report.errors.len(), "save finished");
    report
}

/// Tag `paths` from a MusicBrainz release. A track-count mismatch fails the
/// whole job before anything is written.
pub fn apply_release(
    paths: Vec<PathBuf>,
    release: &Release,
    cover: Option<CoverArt>,
    progress: Progress<'_>,
    stop: &AtomicBool,
) -> Result<SaveReport> {
    let cover = cover.and_then(|art| match resize_cover(art) {
        Ok(art) => Some(art),
        Err(e) => {
            tracing::warn!(error = %e, "downloaded cover could not be decoded; skipping art");
            None
        }
    });

    let jobs = release_edits(release, &paths, cover.as_ref())?;
    Ok(save_edits(jobs, progress, stop))
}

/// Rename files from their on-disk tags.
pub fn rename_files(
    paths: Vec<PathBuf>,
    pattern: &str,
    progress: Progress<'_>,
    stop: &AtomicBool,
) -> RenameReport {
    let total = paths.len();
    let mut report = RenameReport::default();

    for (i, path) in paths.into_iter().enumerate() {
        if stop.load(Ordering::Relaxed) {
            report.stopped = true;
            break;
        }

        let label = file_label(&path);
        // Tags are unchanged by a rename, so the row read here moves with the file.
        let result = tags::read_track(path.clone()).and_then(|mut row| {
            match plan_rename(&row, pattern)? {
                Some(target) => {
                    rename_file(&path, &target)?;
                    row.path = target;
                    row.dirty = true;
                    Ok(Some(row))
                }
                None => Ok(None),
            }
        });

        match result {
            Ok(Some(row)) => {
                tracing::debug!(from = %path.display(), to = %row.path.display(), "renamed");
                report.renamed.push((path, row));
            }
            Ok(None) => report.unchanged += 1,
            Err(e) => {
                tracing::warn!(file = %label, error = %e, "rename failed");
                report.errors.push(format!("{label}: {e}"));
            }
        }
        progress(i + 1, total);
    }

    tracing::info!(renamed = report.renamed.len(), total, "rename finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TagField;
    use std::path::Path;

    fn blank_mp3(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, vec![0u8; 256]).unwrap();
        path
    }

    #[test]
    fn save_collects_errors_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = blank_mp3(dir.path(), "good.mp3");
        let missing = dir.path().join("missing.mp3");
        let edit = TagEdit::default().with(TagField::Title, "T");

        let mut ticks = Vec::new();
        let stop = AtomicBool::new(false);
        let report = save_edits(
            vec![(missing, edit.clone()), (good.clone(), edit)],
            &mut |done, total| ticks.push((done, total)),
            &stop,
        );

        assert_eq!(report.total, 2);
        assert_eq!(report.saved, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("missing.mp3"));
        assert_eq!(ticks, vec![(1, 2), (2, 2)]);

        assert_eq!(report.rows.len(), 1);
        assert!(report.rows[0].dirty);
        assert_eq!(report.rows[0].tags.get(TagField::Title), Some("T"));
    }

    #[test]
    fn stop_flag_skips_remaining_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = blank_mp3(dir.path(), "a.mp3");

        let stop = AtomicBool::new(true);
        let report = load_files(vec![a], &mut |_, _| {}, &stop);
        assert!(report.stopped);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn rename_uses_on_disk_tags() {
        let dir = tempfile::tempdir().unwrap();
        let a = blank_mp3(dir.path(), "a.mp3");
        tags::write_edit(
            &a,
            &TagEdit::default()
                .with(TagField::Artist, "Band")
                .with(TagField::Title, "Song"),
        )
        .unwrap();
        let b = blank_mp3(dir.path(), "b.mp3");

        let stop = AtomicBool::new(false);
        let report = rename_files(vec![a.clone(), b], "%artist% - %title%", &mut |_, _| {}, &stop);

        assert_eq!(report.renamed.len(), 2);
        let (from, row) = &report.renamed[0];
        assert_eq!(from, &a);
        assert_eq!(row.path, dir.path().join("Band - Song.mp3"));
        assert_eq!(row.tags.get(TagField::Title), Some("Song"));
        assert!(row.dirty);
        assert!(report.errors.is_empty());
        assert!(dir.path().join("Band - Song.mp3").exists());
        assert!(dir.path().join("N_A - N_A.mp3").exists());
    }
}
