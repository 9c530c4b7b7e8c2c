//! core/tags/generic.rs
//! FLAC and Ogg through lofty's format-neutral `Tag`.
//!
//! Each file's primary tag type is used (Vorbis comments). Lofty maps the
//! generic item keys onto the native field names when the file is saved.
//! M4A shares the field mapping and edit logic (see `mp4`).

use std::io::Cursor;
use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::picture::{Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};

use super::super::cover::sniff_mime;
use super::super::error::Result;
use super::super::types::{ArtChange, AudioFormat, CoverArt, TagEdit, TagField, TagSet};
use super::flac;
use super::util::{join_slash_pair, parse_slash_pair_u32};

fn item_key(field: TagField) -> ItemKey {
    match field {
        TagField::Title => ItemKey::TrackTitle,
        TagField::Artist => ItemKey::TrackArtist,
        TagField::Album => ItemKey::AlbumTitle,
        TagField::AlbumArtist => ItemKey::AlbumArtist,
        TagField::Year => ItemKey::RecordingDate,
        TagField::Genre => ItemKey::Genre,
        TagField::TrackNumber => ItemKey::TrackNumber,
        TagField::Composer => ItemKey::Composer,
        TagField::Producer => ItemKey::Producer,
        TagField::Copyright => ItemKey::CopyrightMessage,
        TagField::Comment => ItemKey::Comment,
        TagField::Bpm => ItemKey::Bpm,
        TagField::Isrc => ItemKey::Isrc,
        TagField::CatalogNumber => ItemKey::CatalogNumber,
    }
}

fn open(path: &Path) -> Result<TaggedFile> {
    Ok(Probe::open(path)?.read()?)
}

/// Returns (tags, has_art, duration_ms).
pub(super) fn read_tags(path: &Path) -> Result<(TagSet, bool, Option<u64>)> {
    let tagged = open(path)?;
    let duration_ms = duration_of(&tagged);

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok((TagSet::default(), false, duration_ms));
    };

    let has_art = !tag.pictures().is_empty();
    Ok((tagset_from_tag(tag), has_art, duration_ms))
}

fn duration_of(tagged: &TaggedFile) -> Option<u64> {
    let ms = tagged.properties().duration().as_millis();
    (ms > 0).then(|| ms as u64)
}

/// Length in milliseconds from the container's audio properties.
/// Any failure is reported as "unknown".
pub(super) fn container_duration(path: &Path) -> Option<u64> {
    match open(path) {
        Ok(tagged) => duration_of(&tagged),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no duration");
            None
        }
    }
}

pub(super) fn tagset_from_tag(tag: &Tag) -> TagSet {
    let mut out = TagSet::default();

    for field in TagField::ALL {
        if field == TagField::TrackNumber {
            let n = tag.get_string(&ItemKey::TrackNumber);
            let total = tag.get_string(&ItemKey::TrackTotal);
            if let Some(v) = join_slash_pair(n, total) {
                out.set(field, v);
            }
            continue;
        }
        if let Some(v) = tag.get_string(&item_key(field)) {
            out.set(field, v);
        }
    }

    if out.get(TagField::Year).is_none() {
        if let Some(y) = tag.get_string(&ItemKey::Year) {
            out.set(TagField::Year, y);
        }
    }
    if out.get(TagField::Bpm).is_none() {
        if let Some(bpm) = tag.get_string(&ItemKey::IntegerBpm) {
            out.set(TagField::Bpm, bpm);
        }
    }

    out
}

/// Apply the field and art parts of an edit to an in-memory tag.
pub(super) fn apply_edit_to_tag(tag: &mut Tag, edit: &TagEdit) -> Result<()> {
    for (field, value) in &edit.fields {
        let value = value.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match field {
            TagField::TrackNumber => set_track_number(tag, value),
            TagField::Year => {
                tag.remove_key(&ItemKey::Year);
                set_or_remove(tag, ItemKey::RecordingDate, value);
            }
            other => set_or_remove(tag, item_key(*other), value),
        }
    }

    if let Some(change) = &edit.art {
        while !tag.pictures().is_empty() {
            let _ = tag.remove_picture(0);
        }
        if let ArtChange::Replace(art) = change {
            let mut picture = Picture::from_reader(&mut Cursor::new(&art.data))?;
            picture.set_pic_type(PictureType::CoverFront);
            picture.set_description(Some("Cover".to_string()));
            tag.push_picture(picture);
        }
    }

    Ok(())
}

fn set_or_remove(tag: &mut Tag, key: ItemKey, value: Option<&str>) {
    match value {
        Some(v) => {
            if !tag.insert_text(key.clone(), v.to_string()) {
                tracing::debug!(?key, tag_type = ?tag.tag_type(), "key not supported by tag");
            }
        }
        None => tag.remove_key(&key),
    }
}

/// "3/12" is split into number and total. Anything non-numeric is stored as-is.
fn set_track_number(tag: &mut Tag, value: Option<&str>) {
    tag.remove_key(&ItemKey::TrackTotal);

    let Some(raw) = value else {
        tag.remove_key(&ItemKey::TrackNumber);
        return;
    };

    match parse_slash_pair_u32(Some(raw)) {
        (Some(n), total) => {
            let _ = tag.insert_text(ItemKey::TrackNumber, n.to_string());
            if let Some(t) = total {
                let _ = tag.insert_text(ItemKey::TrackTotal, t.to_string());
            }
        }
        (None, _) => {
            let _ = tag.insert_text(ItemKey::TrackNumber, raw.to_string());
        }
    }
}

pub(super) fn write_edit(path: &Path, edit: &TagEdit) -> Result<()> {
    if AudioFormat::from_path(path) == Some(AudioFormat::Flac) {
        flac::ensure_trailing_padding(path)?;
    }

    let mut tagged = open(path)?;
    let tag_type = tagged.primary_tag_type();

    if tagged.tag(tag_type).is_none() {
        tagged.insert_tag(Tag::new(tag_type));
    }
    if let Some(tag) = tagged.tag_mut(tag_type) {
        apply_edit_to_tag(tag, edit)?;
    }

    tagged.save_to_path(path, WriteOptions::default())?;
    Ok(())
}

pub(super) fn read_art(path: &Path) -> Result<Option<CoverArt>> {
    let tagged = open(path)?;
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(None);
    };

    let pictures = tag.pictures();
    let pick = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first());

    Ok(pick.map(|p| CoverArt {
        data: p.data().to_vec(),
        mime: sniff_mime(p.data()).to_string(),
    }))
}
