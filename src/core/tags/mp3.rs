//! core/tags/mp3.rs
//! MP3 backend: ID3v2 frames through the `id3` crate.
//!
//! Frame mapping:
//! - TIT2 title, TPE1 artist, TALB album, TPE2 album artist
//! - TDRC year (TYER fallback on read), TCON genre, TRCK track ("n" or "n/total")
//! - TCOM composer, TCOP copyright, TBPM bpm, TSRC isrc
//! - COMM comment (first one on read, a single "eng" one on write)
//! - TXXX:PRODUCER, TXXX:CATALOGNUMBER
//! - APIC pictures

use std::path::Path;

use id3::frame::{Comment, Content, ExtendedText, Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};

use super::super::error::Result;
use super::super::types::{ArtChange, CoverArt, TagEdit, TagField, TagSet};

const TXXX_PRODUCER: &str = "PRODUCER";
const TXXX_CATALOG: &str = "CATALOGNUMBER";

enum FrameSlot {
    Text(&'static str),
    Comment,
    UserText(&'static str),
}

fn slot(field: TagField) -> FrameSlot {
    match field {
        TagField::Title => FrameSlot::Text("TIT2"),
        TagField::Artist => FrameSlot::Text("TPE1"),
        TagField::Album => FrameSlot::Text("TALB"),
        TagField::AlbumArtist => FrameSlot::Text("TPE2"),
        TagField::Year => FrameSlot::Text("TDRC"),
        TagField::Genre => FrameSlot::Text("TCON"),
        TagField::TrackNumber => FrameSlot::Text("TRCK"),
        TagField::Composer => FrameSlot::Text("TCOM"),
        TagField::Copyright => FrameSlot::Text("TCOP"),
        TagField::Bpm => FrameSlot::Text("TBPM"),
        TagField::Isrc => FrameSlot::Text("TSRC"),
        TagField::Comment => FrameSlot::Comment,
        TagField::Producer => FrameSlot::UserText(TXXX_PRODUCER),
        TagField::CatalogNumber => FrameSlot::UserText(TXXX_CATALOG),
    }
}

/// Read the tag, treating "no ID3 tag at all" as an empty tag.
fn read_tag_or_empty(path: &Path) -> Result<Option<Tag>> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(Some(tag)),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns (tags, has_art).
pub(super) fn read_tags(path: &Path) -> Result<(TagSet, bool)> {
    let Some(tag) = read_tag_or_empty(path)? else {
        return Ok((TagSet::default(), false));
    };

    let mut out = TagSet::default();
    for field in TagField::ALL {
        let value = match slot(field) {
            FrameSlot::Text(id) => text_frame(&tag, id),
            FrameSlot::Comment => tag.comments().next().map(|c| c.text.clone()),
            FrameSlot::UserText(desc) => user_text(&tag, desc),
        };
        if let Some(v) = value {
            out.set(field, v);
        }
    }

    // Older v2.3 files keep the year in TYER.
    if out.get(TagField::Year).is_none() {
        if let Some(y) = text_frame(&tag, "TYER") {
            out.set(TagField::Year, y);
        }
    }

    let has_art = tag.pictures().next().is_some();
    Ok((out, has_art))
}

/// Get a best-effort string value from a frame id.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        Content::Link(s) => Some(s.clone()),
        _ => None,
    }
}

fn user_text(tag: &Tag, description: &str) -> Option<String> {
    tag.extended_texts()
        .find(|et| et.description.eq_ignore_ascii_case(description))
        .map(|et| et.value.clone())
}

/// Apply an edit and write the file back as ID3v2.4.
pub(super) fn write_edit(path: &Path, edit: &TagEdit) -> Result<()> {
    let mut tag = read_tag_or_empty(path)?.unwrap_or_default();

    for (field, value) in &edit.fields {
        let value = value.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match slot(*field) {
            FrameSlot::Text(id) => {
                match value {
                    Some(s) => tag.set_text(id, s.to_string()),
                    None => {
                        let _ = tag.remove(id);
                    }
                }
                if *field == TagField::Year {
                    // Never leave a stale v2.3 year behind.
                    let _ = tag.remove("TYER");
                }
            }
            FrameSlot::Comment => {
                let _ = tag.remove("COMM");
                if let Some(s) = value {
                    let _ = tag.add_frame(Comment {
                        lang: "eng".to_string(),
                        description: String::new(),
                        text: s.to_string(),
                    });
                }
            }
            FrameSlot::UserText(desc) => {
                remove_user_text(&mut tag, desc);
                if let Some(s) = value {
                    let _ = tag.add_frame(ExtendedText {
                        description: desc.to_string(),
                        value: s.to_string(),
                    });
                }
            }
        }
    }

    if let Some(change) = &edit.art {
        tag.remove_all_pictures();
        if let ArtChange::Replace(art) = change {
            let _ = tag.add_frame(Picture {
                mime_type: art.mime.clone(),
                picture_type: PictureType::CoverFront,
                description: "Cover".to_string(),
                data: art.data.clone(),
            });
        }
    }

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}

fn remove_user_text(tag: &mut Tag, description: &str) {
    let present: Vec<String> = tag
        .extended_texts()
        .filter(|et| et.description.eq_ignore_ascii_case(description))
        .map(|et| et.description.clone())
        .collect();
    for desc in present {
        tag.remove_extended_text(Some(&desc), None);
    }
}

/// Front cover if there is one, else the first picture.
pub(super) fn read_art(path: &Path) -> Result<Option<CoverArt>> {
    let Some(tag) = read_tag_or_empty(path)? else {
        return Ok(None);
    };

    let pick = tag
        .pictures()
        .find(|p| p.picture_type == PictureType::CoverFront)
        .or_else(|| tag.pictures().next());

    Ok(pick.map(|p| CoverArt {
        data: p.data.clone(),
        mime: p.mime_type.clone(),
    }))
}
