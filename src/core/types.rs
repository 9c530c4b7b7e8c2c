//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No GUI code
//! - No tag parsing code
//!
//! `TrackRow` represents ONE audio file in the working list plus the tags we edit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-session identity of a file in the list.
/// Assigned when the file is added, never reused while the app runs.
pub type TrackId = u64;

/// Extensions the app accepts (lowercase, no dot).
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp3", "flac", "m4a", "ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Flac,
    M4a,
    Ogg,
}

impl AudioFormat {
    /// Format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "m4a" => Some(Self::M4a),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Flac => "FLAC",
            Self::M4a => "M4A",
            Self::Ogg => "Ogg",
        }
    }
}

/// The editable tag fields, in the order the editor shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Year,
    Genre,
    TrackNumber,
    Composer,
    Producer,
    Copyright,
    Comment,
    Bpm,
    Isrc,
    CatalogNumber,
}

impl TagField {
    pub const ALL: [TagField; 14] = [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::AlbumArtist,
        TagField::Year,
        TagField::Genre,
        TagField::TrackNumber,
        TagField::Composer,
        TagField::Producer,
        TagField::Copyright,
        TagField::Comment,
        TagField::Bpm,
        TagField::Isrc,
        TagField::CatalogNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TagField::Title => "Title",
            TagField::Artist => "Artist",
            TagField::Album => "Album",
            TagField::AlbumArtist => "Album Artist",
            TagField::Year => "Year",
            TagField::Genre => "Genre",
            TagField::TrackNumber => "Track Number",
            TagField::Composer => "Composer",
            TagField::Producer => "Producer",
            TagField::Copyright => "Copyright",
            TagField::Comment => "Comment",
            TagField::Bpm => "BPM",
            TagField::Isrc => "ISRC",
            TagField::CatalogNumber => "Catalog Number",
        }
    }
}

/// Tag values present on a file.
/// Only non-empty (trimmed) values are stored; "missing" and "empty" are the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    values: BTreeMap<TagField, String>,
}

impl TagSet {
    pub fn get(&self, field: TagField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Set a value. Empty/whitespace input removes the field.
    pub fn set(&mut self, field: TagField, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, trimmed.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagField, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// One audio file in the working list.
#[derive(Debug, Clone)]
pub struct TrackRow {
    /// Identity is assigned by the list owner (GUI), not by tag reading.
    pub id: Option<TrackId>,

    /// Full file path on disk.
    pub path: PathBuf,

    pub format: AudioFormat,

    pub tags: TagSet,

    /// Length from audio properties, when the container reports one.
    pub duration_ms: Option<u64>,

    /// At least one embedded picture.
    pub has_art: bool,

    /// Written (tags, art or name) during this session.
    pub dirty: bool,
}

impl TrackRow {
    /// File name including extension. Falls back to the full path display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// One-line label for the file list: "song.mp3 - Title by Artist".
    pub fn list_label(&self) -> String {
        let title = self.tags.get(TagField::Title).unwrap_or("");
        let artist = self.tags.get(TagField::Artist).unwrap_or("");
        let base = format!("{} - {title} by {artist}", self.file_name());
        if self.dirty { format!("{base} (*)") } else { base }
    }
}

/// Raw image bytes + MIME type ("image/jpeg", "image/png").
#[derive(Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub data: Vec<u8>,
    pub mime: String,
}

// Manual Debug: a cover can be several hundred KB.
impl std::fmt::Debug for CoverArt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverArt")
            .field("mime", &self.mime)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtChange {
    Replace(CoverArt),
    Remove,
}

/// A set of changes to write to one or more files.
///
/// - field -> Some(non-empty) => set the tag
/// - field -> None (or empty) => delete the tag
/// - field absent => untouched
/// - art None => pictures untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEdit {
    pub fields: BTreeMap<TagField, Option<String>>,
    pub art: Option<ArtChange>,
}

impl TagEdit {
    /// Record a field write. Empty/whitespace values become deletions.
    pub fn set(&mut self, field: TagField, value: &str) {
        let t = value.trim();
        let v = if t.is_empty() { None } else { Some(t.to_string()) };
        self.fields.insert(field, v);
    }

    pub fn with(mut self, field: TagField, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.art.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension_ignores_case() {
        assert_eq!(AudioFormat::from_path(Path::new("a/B.MP3")), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_path(Path::new("x.Flac")), Some(AudioFormat::Flac));
        assert_eq!(AudioFormat::from_path(Path::new("x.m4a")), Some(AudioFormat::M4a));
        assert_eq!(AudioFormat::from_path(Path::new("x.ogg")), Some(AudioFormat::Ogg));
        assert_eq!(AudioFormat::from_path(Path::new("x.wav")), None);
        assert_eq!(AudioFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn tag_set_drops_blank_values() {
        let mut tags = TagSet::default();
        tags.set(TagField::Title, "  Song  ");
        assert_eq!(tags.get(TagField::Title), Some("Song"));

        tags.set(TagField::Title, "   ");
        assert_eq!(tags.get(TagField::Title), None);
        assert!(tags.is_empty());
    }

    #[test]
    fn edit_records_blank_values_as_deletions() {
        let edit = TagEdit::default()
            .with(TagField::Title, " New ")
            .with(TagField::Genre, "  ");

        assert_eq!(edit.fields[&TagField::Title].as_deref(), Some("New"));
        assert_eq!(edit.fields[&TagField::Genre], None);
        assert!(!edit.fields.contains_key(&TagField::Artist));
        assert!(!edit.is_empty());
        assert!(TagEdit::default().is_empty());
    }

    #[test]
    fn list_label_marks_dirty_rows() {
        let mut tags = TagSet::default();
        tags.set(TagField::Title, "Intro");
        tags.set(TagField::Artist, "Band");
        let mut row = TrackRow {
            id: None,
            path: PathBuf::from("/music/01.flac"),
            format: AudioFormat::Flac,
            tags,
            duration_ms: None,
            has_art: false,
            dirty: false,
        };
        assert_eq!(row.list_label(), "01.flac - Intro by Band");

        row.dirty = true;
        assert_eq!(row.list_label(), "01.flac - Intro by Band (*)");
    }

    #[test]
    fn empty_edit_is_empty() {
        assert!(TagEdit::default().is_empty());
        let edit = TagEdit {
            art: Some(ArtChange::Remove),
            ..Default::default()
        };
        assert!(!edit.is_empty());
    }
}
