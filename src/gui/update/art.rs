//! gui/update/art.rs
//!
//! Album art: preview loading, replace (pick + resize off-thread) and delete.
//! Changes are only staged in the editor draft; the save writes them.
//!
//! Cover preview cache is keyed by `TrackId`.

use std::path::{Path, PathBuf};

use iced::Task;
use iced::widget::image::Handle;

use super::super::state::{ConfirmAction, Message, Tagwright};
use super::helpers::spawn_blocking;
use crate::core::cover::{IMAGE_EXTENSIONS, prepare_cover_from_file};
use crate::core::types::{ArtChange, CoverArt, TrackId};

pub(crate) fn change_art_pressed(state: &mut Tagwright) -> Task<Message> {
    if state.selected.is_empty() {
        state.status = "Select a file first.".to_string();
        return Task::none();
    }

    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .set_title("Select Album Art")
                .add_filter("Image Files", &IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::ArtPicked,
    )
}

pub(crate) fn art_picked(state: &mut Tagwright, path: Option<PathBuf>) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };

    state.status = "Preparing album art...".to_string();
    Task::perform(
        spawn_blocking(move || prepare_cover_from_file(&path).map_err(|e| e.to_string())),
        Message::ArtPrepared,
    )
}

pub(crate) fn art_prepared(state: &mut Tagwright, result: Result<CoverArt, String>) -> Task<Message> {
    match result {
        Ok(art) => {
            state.editor.art = Some(ArtChange::Replace(art));
            state.editor.dirty = true;
            state.status = "New album art will be written on save.".to_string();
        }
        Err(e) => state.status = format!("Could not load image: {e}"),
    }
    Task::none()
}

pub(crate) fn delete_art_pressed(state: &mut Tagwright) -> Task<Message> {
    if state.selected.is_empty() {
        state.status = "Select a file first.".to_string();
        return Task::none();
    }
    state.confirm = Some(ConfirmAction::DeleteArt);
    Task::none()
}

/// Called once the delete was confirmed.
pub(crate) fn stage_art_removal(state: &mut Tagwright) {
    state.editor.art = Some(ArtChange::Remove);
    state.editor.dirty = true;
    state.status = "Art will be deleted on save.".to_string();
}

pub(crate) fn cover_loaded(state: &mut Tagwright, id: TrackId, handle: Option<Handle>) -> Task<Message> {
    match handle {
        Some(h) => {
            state.cover_cache.insert(id, h);
        }
        None => {
            state.cover_cache.remove(&id);
        }
    }
    Task::none()
}

pub(crate) fn maybe_load_cover(state: &mut Tagwright, id: TrackId) -> Task<Message> {
    if state.cover_cache.contains_key(&id) {
        return Task::none();
    }

    let Some(track) = state.track_by_id(id) else {
        return Task::none();
    };
    if !track.has_art {
        return Task::none();
    }

    let path = track.path.clone();
    Task::perform(
        spawn_blocking(move || Ok(load_cover_handle_from_path(&path))),
        move |res: Result<Option<Handle>, String>| Message::CoverLoaded(id, res.ok().flatten()),
    )
}

fn load_cover_handle_from_path(path: &Path) -> Option<Handle> {
    match crate::core::tags::read_embedded_art(path) {
        Ok(art) => art.map(|a| Handle::from_bytes(a.data)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no preview");
            None
        }
    }
}
