//! gui/update/search.rs
//!
//! MusicBrainz search panel and "apply release".
//!
//! Network calls run as tasks; the tag writes go through the worker.

use iced::Task;

use super::super::state::{JobKind, Message, Panel, SearchState, Tagwright};
use super::worker::start_job;
use crate::core::types::{CoverArt, TagField};
use crate::core::worker::WorkerCommand;
use crate::musicbrainz::{Release, ReleaseSummary, fetch_release_with_cover};

const MB_DISABLED: &str = "MusicBrainz is disabled: set a contact email first.";
const NO_RESULTS: &str = "No results found. Consider submitting this release.";

/// (artist, album) guess from the first selected file.
pub(crate) fn prefill_from_selection(state: &Tagwright) -> (String, String) {
    let Some(first) = state.selected_rows().into_iter().next() else {
        return (String::new(), String::new());
    };
    let tags = &first.tags;
    let artist = tags
        .get(TagField::AlbumArtist)
        .or_else(|| tags.get(TagField::Artist))
        .unwrap_or("");
    let album = tags.get(TagField::Album).unwrap_or("");
    (artist.to_string(), album.to_string())
}

pub(crate) fn open_search(state: &mut Tagwright) -> Task<Message> {
    if !state.musicbrainz_enabled() {
        state.status = MB_DISABLED.to_string();
        return Task::none();
    }

    let (artist, album) = prefill_from_selection(state);
    let prefilled = !artist.is_empty() || !album.is_empty();

    state.search = SearchState {
        artist,
        album,
        ..Default::default()
    };
    state.panel = Panel::Search;

    if prefilled { run_search(state) } else { Task::none() }
}

pub(crate) fn artist_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.search.artist = s;
    Task::none()
}

pub(crate) fn album_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.search.album = s;
    Task::none()
}

pub(crate) fn run_search(state: &mut Tagwright) -> Task<Message> {
    if state.search.searching {
        return Task::none();
    }
    let Some(client) = state.mb_client.clone() else {
        state.status = MB_DISABLED.to_string();
        return Task::none();
    };

    let artist = state.search.artist.trim().to_string();
    let album = state.search.album.trim().to_string();

    state.search.searching = true;
    state.search.results.clear();
    state.search.selected = None;
    state.search.message = None;
    state.status = "Searching MusicBrainz...".to_string();

    Task::perform(
        async move {
            client
                .search_releases(&artist, &album)
                .await
                .map_err(|e| e.to_string())
        },
        Message::SearchFinished,
    )
}

pub(crate) fn search_finished(
    state: &mut Tagwright,
    result: Result<Vec<ReleaseSummary>, String>,
) -> Task<Message> {
    state.search.searching = false;

    match result {
        Ok(results) if results.is_empty() => {
            state.search.message = Some(NO_RESULTS.to_string());
            state.status = "Search finished.".to_string();
        }
        Ok(results) => {
            state.status = format!("Found {} release(s).", results.len());
            state.search.results = results;
        }
        Err(e) => {
            tracing::warn!(error = %e, "release search failed");
            state.search.message = Some(format!("Search failed: {e}"));
            state.status = "Search failed.".to_string();
        }
    }
    Task::none()
}

pub(crate) fn result_selected(state: &mut Tagwright, i: usize) -> Task<Message> {
    if i < state.search.results.len() {
        state.search.selected = Some(i);
    }
    Task::none()
}

pub(crate) fn apply_release(state: &mut Tagwright) -> Task<Message> {
    if !state.can_apply_release() {
        if state.selected.is_empty() {
            state.status = "Select the files to tag first.".to_string();
        }
        return Task::none();
    }
    let Some(client) = state.mb_client.clone() else {
        state.status = MB_DISABLED.to_string();
        return Task::none();
    };
    let Some(summary) = state.search.selected.and_then(|i| state.search.results.get(i)) else {
        return Task::none();
    };

    let id = summary.id.clone();
    let title = summary.title.clone();
    state.search.fetching = true;
    state.status = format!("Fetching \"{title}\"...");

    Task::perform(
        async move {
            fetch_release_with_cover(&client, &id)
                .await
                .map_err(|e| e.to_string())
        },
        Message::ReleaseFetched,
    )
}

pub(crate) fn release_fetched(
    state: &mut Tagwright,
    result: Result<(Release, Option<CoverArt>), String>,
) -> Task<Message> {
    state.search.fetching = false;

    let (release, cover) = match result {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(error = %e, "release lookup failed");
            state.status = format!("Could not fetch release: {e}");
            return Task::none();
        }
    };

    let paths = state.selected_paths();
    if paths.is_empty() {
        state.status = "Select the files to tag first.".to_string();
        return Task::none();
    }

    tracing::info!(
        release = %release.id,
        files = paths.len(),
        cover = cover.is_some(),
        "applying release"
    );

    let title = release.title.clone();
    let cmd = WorkerCommand::ApplyRelease {
        paths,
        release: Box::new(release),
        cover,
    };
    if start_job(state, JobKind::Applying, cmd) {
        state.status = format!("Applying \"{title}\"...");
        state.panel = Panel::Editor;
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::core::types::{AudioFormat, TagSet, TrackRow};
    use std::path::PathBuf;

    fn row(id: u64, tags: &[(TagField, &str)]) -> TrackRow {
        let mut set = TagSet::default();
        for (f, v) in tags {
            set.set(*f, *v);
        }
        TrackRow {
            id: Some(id),
            path: PathBuf::from(format!("/m/{id}.flac")),
            format: AudioFormat::Flac,
            tags: set,
            duration_ms: None,
            has_art: false,
            dirty: false,
        }
    }

    #[test]
    fn prefill_prefers_album_artist_of_first_selected() {
        let mut state = Tagwright::new(Settings::default());
        state.tracks = vec![
            row(1, &[(TagField::Artist, "Ignored")]),
            row(
                2,
                &[
                    (TagField::Artist, "Guest"),
                    (TagField::AlbumArtist, "Band"),
                    (TagField::Album, "Record"),
                ],
            ),
            row(3, &[(TagField::Artist, "Other")]),
        ];
        state.selected = [2, 3].into_iter().collect();

        assert_eq!(
            prefill_from_selection(&state),
            ("Band".to_string(), "Record".to_string())
        );
    }

    #[test]
    fn search_is_refused_without_contact_email() {
        let mut state = Tagwright::new(Settings::default());
        let _ = open_search(&mut state);
        assert_eq!(state.status, MB_DISABLED);
        assert_ne!(state.panel, Panel::Search);
    }

    #[test]
    fn empty_result_list_suggests_submitting() {
        let mut state = Tagwright::new(Settings::default());
        state.search.searching = true;
        let _ = search_finished(&mut state, Ok(Vec::new()));
        assert!(!state.search.searching);
        assert_eq!(state.search.message.as_deref(), Some(NO_RESULTS));
    }
}
