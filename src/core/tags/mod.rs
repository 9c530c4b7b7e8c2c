//! core/tags/mod.rs
//!
//! Tag read/write for every supported format.
//! Public API:
//! - [`read_track`] reads a file into a [`TrackRow`].
//! - [`write_edit`] applies a [`TagEdit`] to one file on disk.
//! - [`read_embedded_art`] pulls the front cover (or first picture).
//!
//! MP3 goes through `id3` (frame-level control, v2.4 output).
//! FLAC and Ogg go through lofty's generic tag, M4A through lofty's ilst.

mod flac;
mod generic;
mod mp3;
mod mp4;
pub(crate) mod util;

use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::types::{AudioFormat, CoverArt, TagEdit, TrackRow};

fn format_of(path: &Path) -> Result<AudioFormat> {
    AudioFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))
}

fn ensure_file(path: &Path) -> Result<()> {
    std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Read tags, art presence and duration. The row has no id yet.
pub fn read_track(path: PathBuf) -> Result<TrackRow> {
    let format = format_of(&path)?;
    ensure_file(&path)?;

    let (tags, has_art, duration_ms) = match format {
        AudioFormat::Mp3 => {
            let (tags, has_art) = mp3::read_tags(&path)?;
            (tags, has_art, generic::container_duration(&path))
        }
        AudioFormat::M4a => mp4::read_tags(&path)?,
        AudioFormat::Flac | AudioFormat::Ogg => generic::read_tags(&path)?,
    };

    Ok(TrackRow {
        id: None,
        path,
        format,
        tags,
        duration_ms,
        has_art,
        dirty: false,
    })
}

/// Write the edit to disk. An empty edit is a no-op.
pub fn write_edit(path: &Path, edit: &TagEdit) -> Result<()> {
    let format = format_of(path)?;
    if edit.is_empty() {
        return Ok(());
    }
    ensure_file(path)?;

    match format {
        AudioFormat::Mp3 => mp3::write_edit(path, edit),
        AudioFormat::M4a => mp4::write_edit(path, edit),
        AudioFormat::Flac | AudioFormat::Ogg => generic::write_edit(path, edit),
    }
}

pub fn read_embedded_art(path: &Path) -> Result<Option<CoverArt>> {
    match format_of(path)? {
        AudioFormat::Mp3 => mp3::read_art(path),
        AudioFormat::Flac | AudioFormat::M4a | AudioFormat::Ogg => generic::read_art(path),
    }
}
