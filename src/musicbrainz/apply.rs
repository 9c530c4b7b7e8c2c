//! Map a fetched release onto a set of files.

use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::core::tags::util::year_part;
use crate::core::types::{ArtChange, CoverArt, TagEdit, TagField};

use super::types::Release;

/// One (path, edit) pair per file, files ordered by file name and matched to
/// the first medium's tracks in order.
pub fn release_edits(
    release: &Release,
    paths: &[PathBuf],
    cover: Option<&CoverArt>,
) -> Result<Vec<(PathBuf, TagEdit)>> {
    let medium = release.media.first().ok_or(Error::EmptyRelease)?;
    let total = medium.tracks.len();

    if paths.len() != total {
        return Err(Error::TrackMismatch {
            files: paths.len(),
            tracks: total,
        });
    }

    let mut sorted: Vec<PathBuf> = paths.to_vec();
    sorted.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    let album_artist = release.artist.as_deref().unwrap_or("");
    let year = release.date.as_deref().map(year_part).unwrap_or("");

    let edits = sorted
        .into_iter()
        .zip(&medium.tracks)
        .enumerate()
        .map(|(i, (path, track))| {
            let artist = track.artist.as_deref().unwrap_or(album_artist);
            let number = match track.number.trim() {
                "" => (i + 1).to_string(),
                n => n.to_string(),
            };
            let mut edit = TagEdit::default()
                .with(TagField::Title, &track.title)
                .with(TagField::Artist, artist)
                .with(TagField::AlbumArtist, album_artist)
                .with(TagField::Album, &release.title)
                .with(TagField::Year, year)
                .with(TagField::TrackNumber, &format!("{number}/{total}"));
            edit.art = cover.cloned().map(ArtChange::Replace);
            (path, edit)
        })
        .collect();

    Ok(edits)
}
