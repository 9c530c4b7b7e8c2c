//! gui/update/submit.rs
//! Submission panel: edit the draft, then hand it to the MusicBrainz release editor.

use iced::Task;

use super::super::state::{Message, Panel, Tagwright};
use super::helpers::spawn_blocking;
use crate::musicbrainz::submit::{ReleaseType, SubmissionDraft};

pub(crate) fn open_submit(state: &mut Tagwright) -> Task<Message> {
    if !state.musicbrainz_enabled() {
        state.status = "MusicBrainz is disabled: set a contact email first.".to_string();
        return Task::none();
    }
    if state.selected.is_empty() {
        state.status = "Select the files of the release first.".to_string();
        return Task::none();
    }

    state.submit = SubmissionDraft::from_rows(&state.selected_rows());
    state.panel = Panel::Submit;
    Task::none()
}

pub(crate) fn artist_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.submit.album_artist = s;
    Task::none()
}

pub(crate) fn title_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.submit.album_title = s;
    Task::none()
}

pub(crate) fn date_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.submit.release_date = s;
    Task::none()
}

pub(crate) fn type_changed(state: &mut Tagwright, t: ReleaseType) -> Task<Message> {
    state.submit.release_type = t;
    Task::none()
}

pub(crate) fn track_title_changed(state: &mut Tagwright, i: usize, s: String) -> Task<Message> {
    if let Some(track) = state.submit.tracks.get_mut(i) {
        track.title = s;
    }
    Task::none()
}

pub(crate) fn open_release_editor(state: &mut Tagwright) -> Task<Message> {
    if let Err(e) = state.submit.validate() {
        state.status = e.to_string();
        return Task::none();
    }

    let draft = state.submit.clone();
    state.status = "Opening the MusicBrainz release editor...".to_string();

    Task::perform(
        spawn_blocking(move || draft.open_in_browser().map_err(|e| e.to_string())),
        Message::ReleaseEditorOpened,
    )
}

pub(crate) fn release_editor_opened(
    state: &mut Tagwright,
    result: Result<std::path::PathBuf, String>,
) -> Task<Message> {
    match result {
        Ok(_) => {
            state.status =
                "Release editor opened in your browser. Sign in there to finish the submission."
                    .to_string();
            state.panel = Panel::Editor;
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not open release editor");
            state.status = format!("Could not open the release editor: {e}");
        }
    }
    Task::none()
}
