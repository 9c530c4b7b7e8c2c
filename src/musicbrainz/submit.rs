//! New-release submission through MusicBrainz release-editor seeding.
//!
//! The draft is turned into a self-submitting HTML form that POSTs to
//! `/release/add`. The user signs in on the MusicBrainz site and reviews the
//! pre-filled editor there; nothing here ever sees their credentials.

use std::fmt;
use std::path::PathBuf;

use crate::config::{APP_NAME, APP_VERSION};
use crate::core::error::{Error, Result};
use crate::core::tags::util::number_part;
use crate::core::types::{TagField, TrackRow};

pub const RELEASE_EDITOR_URL: &str = "https://musicbrainz.org/release/add";
const SEED_FILE_NAME: &str = "tagwright-release-seed.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseType {
    #[default]
    Album,
    Ep,
    Single,
    Other,
}

impl ReleaseType {
    pub const ALL: [ReleaseType; 4] = [
        ReleaseType::Album,
        ReleaseType::Ep,
        ReleaseType::Single,
        ReleaseType::Other,
    ];

    /// Primary type name the release editor understands.
    fn seed_value(self) -> &'static str {
        match self {
            ReleaseType::Album => "album",
            ReleaseType::Ep => "ep",
            ReleaseType::Single => "single",
            ReleaseType::Other => "other",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseType::Album => "Album",
            ReleaseType::Ep => "EP",
            ReleaseType::Single => "Single",
            ReleaseType::Other => "Other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTrack {
    pub number: String,
    pub title: String,
    pub length_ms: Option<u64>,
}

impl DraftTrack {
    pub fn duration_text(&self) -> String {
        self.length_ms.map(format_duration).unwrap_or_default()
    }
}

/// "MM:SS" under an hour, "H:MM:SS" otherwise.
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub album_artist: String,
    pub album_title: String,
    /// "YYYY", "YYYY-MM" or "YYYY-MM-DD"
    pub release_date: String,
    pub release_type: ReleaseType,
    pub tracks: Vec<DraftTrack>,
}

impl SubmissionDraft {
    /// Pre-fill from the selected files, in list order.
    pub fn from_rows(rows: &[&TrackRow]) -> Self {
        let mut draft = SubmissionDraft::default();

        if let Some(first) = rows.first() {
            let tags = &first.tags;
            draft.album_artist = tags
                .get(TagField::AlbumArtist)
                .or_else(|| tags.get(TagField::Artist))
                .unwrap_or("")
                .to_string();
            draft.album_title = tags.get(TagField::Album).unwrap_or("").to_string();
            draft.release_date = tags.get(TagField::Year).unwrap_or("").to_string();
        }

        draft.tracks = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let number = row
                    .tags
                    .get(TagField::TrackNumber)
                    .map(number_part)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| (i + 1).to_string());
                let title = row
                    .tags
                    .get(TagField::Title)
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        row.path
                            .file_stem()
                            .map(|s| s.to_string_lossy().to_string())
                            .unwrap_or_default()
                    });
                DraftTrack {
                    number,
                    title,
                    length_ms: row.duration_ms,
                }
            })
            .collect();

        draft
    }

    pub fn validate(&self) -> Result<()> {
        if self.album_artist.trim().is_empty() || self.album_title.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Album Artist and Album Title are required.".to_string(),
            ));
        }
        if self.tracks.is_empty() {
            return Err(Error::InvalidInput("A release needs at least one track.".to_string()));
        }
        Ok(())
    }

    /// Release-editor seeding parameters, in form order.
    pub fn seed_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut push = |k: &str, v: String| fields.push((k.to_string(), v));

        push("name", self.album_title.trim().to_string());
        push("artist_credit.names.0.name", self.album_artist.trim().to_string());
        push("type", self.release_type.seed_value().to_string());

        let mut date = self.release_date.trim().split('-');
        for key in ["date.year", "date.month", "date.day"] {
            match date.next().map(str::trim).filter(|p| !p.is_empty()) {
                Some(part) => push(key, part.to_string()),
                None => break,
            }
        }

        push("mediums.0.format", "Digital Media".to_string());
        for (i, track) in self.tracks.iter().enumerate() {
            push(&format!("mediums.0.track.{i}.number"), track.number.trim().to_string());
            push(&format!("mediums.0.track.{i}.name"), track.title.trim().to_string());
            if let Some(ms) = track.length_ms {
                push(&format!("mediums.0.track.{i}.length"), ms.to_string());
            }
        }

        push("edit_note", format!("Seeded from local files by {APP_NAME} {APP_VERSION}."));
        fields
    }

    /// A page that POSTs the seed fields to the release editor on load.
    pub fn render_seed_page(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>{} - MusicBrainz release editor</title></head>\n",
            escape_html(APP_NAME)
        ));
        html.push_str("<body onload=\"document.forms[0].submit()\">\n");
        html.push_str(&format!(
            "<form method=\"post\" action=\"{RELEASE_EDITOR_URL}\" accept-charset=\"UTF-8\">\n"
        ));
        for (name, value) in self.seed_fields() {
            html.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
                escape_html(&name),
                escape_html(&value)
            ));
        }
        html.push_str("<p>Opening the MusicBrainz release editor...</p>\n");
        html.push_str("<noscript><button type=\"submit\">Continue to MusicBrainz</button></noscript>\n");
        html.push_str("</form></body></html>\n");
        html
    }

    /// Write the seed page to the temp dir and open it in the default browser.
    pub fn open_in_browser(&self) -> Result<PathBuf> {
        self.validate()?;

        let path = std::env::temp_dir().join(SEED_FILE_NAME);
        std::fs::write(&path, self.render_seed_page()).map_err(|e| Error::io(&path, e))?;
        open::that(&path).map_err(|e| Error::io(&path, e))?;

        tracing::info!(
            title = %self.album_title,
            tracks = self.tracks.len(),
            "opened MusicBrainz release editor"
        );
        Ok(path)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AudioFormat, TagSet};

    fn row(path: &str, tags: &[(TagField, &str)], duration_ms: Option<u64>) -> TrackRow {
        let mut set = TagSet::default();
        for (f, v) in tags {
            set.set(*f, *v);
        }
        TrackRow {
            id: None,
            path: PathBuf::from(path),
            format: AudioFormat::Mp3,
            tags: set,
            duration_ms,
            has_art: false,
            dirty: false,
        }
    }

    fn value<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
        fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(185_000), "03:05");
        assert_eq!(format_duration(59_999), "00:59");
        assert_eq!(format_duration(3_723_000), "1:02:03");
    }

    #[test]
    fn draft_prefills_from_rows() {
        let a = row(
            "/m/01.mp3",
            &[
                (TagField::Artist, "Solo"),
                (TagField::Album, "Record"),
                (TagField::Year, "2010-02"),
                (TagField::TrackNumber, "1/2"),
                (TagField::Title, "Opener"),
            ],
            Some(200_000),
        );
        let b = row("/m/second take.mp3", &[], None);

        let draft = SubmissionDraft::from_rows(&[&a, &b]);
        assert_eq!(draft.album_artist, "Solo");
        assert_eq!(draft.album_title, "Record");
        assert_eq!(draft.release_date, "2010-02");
        assert_eq!(draft.tracks[0].number, "1");
        assert_eq!(draft.tracks[0].duration_text(), "03:20");
        assert_eq!(draft.tracks[1].number, "2");
        assert_eq!(draft.tracks[1].title, "second take");
        assert_eq!(draft.tracks[1].duration_text(), "");
    }

    #[test]
    fn validation_requires_artist_and_title() {
        let mut draft = SubmissionDraft {
            album_artist: "A".into(),
            album_title: " ".into(),
            tracks: vec![DraftTrack {
                number: "1".into(),
                title: "t".into(),
                length_ms: None,
            }],
            ..Default::default()
        };
        assert!(draft.validate().is_err());
        draft.album_title = "T".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn seed_fields_cover_release_and_tracks() {
        let draft = SubmissionDraft {
            album_artist: "Band".into(),
            album_title: "Record".into(),
            release_date: "2001-07".into(),
            release_type: ReleaseType::Ep,
            tracks: vec![
                DraftTrack {
                    number: "1".into(),
                    title: "One".into(),
                    length_ms: Some(90_000),
                },
                DraftTrack {
                    number: "2".into(),
                    title: "Two".into(),
                    length_ms: None,
                },
            ],
        };

        let fields = draft.seed_fields();
        assert_eq!(value(&fields, "name"), Some("Record"));
        assert_eq!(value(&fields, "artist_credit.names.0.name"), Some("Band"));
        assert_eq!(value(&fields, "type"), Some("ep"));
        assert_eq!(value(&fields, "date.year"), Some("2001"));
        assert_eq!(value(&fields, "date.month"), Some("07"));
        assert_eq!(value(&fields, "date.day"), None);
        assert_eq!(value(&fields, "mediums.0.format"), Some("Digital Media"));
        assert_eq!(value(&fields, "mediums.0.track.1.name"), Some("Two"));
        assert_eq!(value(&fields, "mediums.0.track.0.length"), Some("90000"));
        assert_eq!(value(&fields, "mediums.0.track.1.length"), None);
    }

    #[test]
    fn seed_page_escapes_values() {
        let draft = SubmissionDraft {
            album_artist: "Tom & \"Jerry\"".into(),
            album_title: "<Live>".into(),
            tracks: vec![DraftTrack {
                number: "1".into(),
                title: "x".into(),
                length_ms: None,
            }],
            ..Default::default()
        };
        let html = draft.render_seed_page();
        assert!(html.contains(RELEASE_EDITOR_URL));
        assert!(html.contains("value=\"Tom &amp; &quot;Jerry&quot;\""));
        assert!(html.contains("value=\"&lt;Live&gt;\""));
        assert!(!html.contains("<Live>"));
    }
}
