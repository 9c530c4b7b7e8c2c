//! Wire structs (serde, as MusicBrainz sends them) and the flattened
//! release model the rest of the app uses.

use serde::Deserialize;

/// One entry of an `artist-credit` array.
#[derive(Debug, Clone, Deserialize)]
pub struct MbArtistCredit {
    pub name: String,
    #[serde(default)]
    pub joinphrase: String,
}

/// "A feat. B" from `[{name: A, joinphrase: " feat. "}, {name: B}]`.
pub fn credit_phrase(credits: &[MbArtistCredit]) -> String {
    credits
        .iter()
        .map(|c| format!("{}{}", c.name, c.joinphrase))
        .collect::<String>()
}

fn non_empty_phrase(credits: &[MbArtistCredit]) -> Option<String> {
    let phrase = credit_phrase(credits);
    let phrase = phrase.trim();
    (!phrase.is_empty()).then(|| phrase.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct MbSearchResponse {
    #[serde(default)]
    pub releases: Vec<MbRelease>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MbRelease {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<MbArtistCredit>,
    /// Present in search results.
    #[serde(rename = "track-count", default)]
    pub track_count: Option<u32>,
    #[serde(default)]
    pub media: Vec<MbMedium>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MbMedium {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(rename = "track-count", default)]
    pub track_count: Option<u32>,
    #[serde(default)]
    pub tracks: Vec<MbTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MbTrack {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<MbArtistCredit>,
    #[serde(default)]
    pub recording: Option<MbRecording>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MbRecording {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<MbArtistCredit>,
}

/// A search hit, as listed in the search panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub track_count: Option<u32>,
}

impl ReleaseSummary {
    /// "Artist - Title (date) [n tracks]", with N/A for anything missing.
    pub fn display_line(&self) -> String {
        let tracks = self
            .track_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "{} - {} ({}) [{} tracks]",
            self.artist.as_deref().unwrap_or("N/A"),
            self.title,
            self.date.as_deref().filter(|d| !d.is_empty()).unwrap_or("N/A"),
            tracks
        )
    }
}

impl From<MbRelease> for ReleaseSummary {
    fn from(r: MbRelease) -> Self {
        let track_count = r.track_count.or_else(|| {
            let sum: u32 = r.media.iter().filter_map(|m| m.track_count).sum();
            (sum > 0).then_some(sum)
        });
        Self {
            artist: non_empty_phrase(&r.artist_credit),
            id: r.id,
            title: r.title,
            date: r.date,
            track_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub media: Vec<Medium>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medium {
    pub format: Option<String>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Display number ("1", "A1", ...).
    pub number: String,
    pub title: String,
    pub artist: Option<String>,
    pub length_ms: Option<u64>,
}

impl From<MbTrack> for Track {
    fn from(t: MbTrack) -> Self {
        let recording = t.recording.as_ref();
        let title = t
            .title
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| recording.and_then(|r| r.title.clone()))
            .unwrap_or_default();
        let artist = non_empty_phrase(&t.artist_credit)
            .or_else(|| recording.and_then(|r| non_empty_phrase(&r.artist_credit)));
        let number = t
            .number
            .clone()
            .or_else(|| t.position.map(|p| p.to_string()))
            .unwrap_or_default();

        Self {
            number,
            title,
            artist,
            length_ms: t.length.or_else(|| recording.and_then(|r| r.length)),
        }
    }
}

impl From<MbRelease> for Release {
    fn from(r: MbRelease) -> Self {
        Self {
            artist: non_empty_phrase(&r.artist_credit),
            id: r.id,
            title: r.title,
            date: r.date.filter(|d| !d.is_empty()),
            media: r
                .media
                .into_iter()
                .map(|m| Medium {
                    format: m.format,
                    tracks: m.tracks.into_iter().map(Track::from).collect(),
                })
                .collect(),
        }
    }
}
