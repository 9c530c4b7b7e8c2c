//! gui/update/files.rs
//!
//! File list: load (dialog or drop), remove, clear, reorder, and the yes/no
//! bar for destructive actions.

use std::collections::BTreeSet;
use std::path::PathBuf;

use iced::Task;

use super::super::state::{ConfirmAction, Message, MoveDir, Tagwright};
use super::art::stage_art_removal;
use super::selection::{prune_selection, selection_changed};
use super::worker::start_load;
use crate::core::types::{SUPPORTED_EXTENSIONS, TrackId, TrackRow};

pub(crate) fn load_files_pressed(state: &mut Tagwright) -> Task<Message> {
    if state.busy.is_some() {
        return Task::none();
    }

    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .set_title("Select Audio Files")
                .add_filter("Audio Files", &SUPPORTED_EXTENSIONS)
                .pick_files()
                .await
                .map(|handles| {
                    handles
                        .into_iter()
                        .map(|h| h.path().to_path_buf())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        },
        Message::FilesPicked,
    )
}

pub(crate) fn files_picked(state: &mut Tagwright, paths: Vec<PathBuf>) -> Task<Message> {
    if paths.is_empty() {
        return Task::none();
    }
    if state.busy.is_some() {
        // Picked the same way a drop is: flushed on the next idle tick.
        state.pending_drops.extend(paths);
        return Task::none();
    }
    start_load(state, paths);
    Task::none()
}

/// One event per dropped path; queued until the next tick.
pub(crate) fn file_dropped(state: &mut Tagwright, path: PathBuf) -> Task<Message> {
    state.pending_drops.push(path);
    Task::none()
}

pub(crate) fn remove_selected_pressed(state: &mut Tagwright) -> Task<Message> {
    if state.busy.is_some() {
        return Task::none();
    }
    if state.selected.is_empty() {
        state.status = "Select a file first.".to_string();
        return Task::none();
    }
    state.confirm = Some(ConfirmAction::RemoveSelected);
    Task::none()
}

pub(crate) fn clear_all_pressed(state: &mut Tagwright) -> Task<Message> {
    if state.busy.is_some() || state.tracks.is_empty() {
        return Task::none();
    }
    state.confirm = Some(ConfirmAction::ClearAll);
    Task::none()
}

pub(crate) fn confirm_no(state: &mut Tagwright) -> Task<Message> {
    state.confirm = None;
    Task::none()
}

pub(crate) fn confirm_yes(state: &mut Tagwright) -> Task<Message> {
    let Some(action) = state.confirm.take() else {
        return Task::none();
    };

    match action {
        ConfirmAction::RemoveSelected => {
            let before = state.tracks.len();
            let selected = std::mem::take(&mut state.selected);
            state
                .tracks
                .retain(|t| !t.id.is_some_and(|id| selected.contains(&id)));
            prune_selection(state);
            state.status = format!("Removed {} file(s) from the list.", before - state.tracks.len());
            selection_changed(state)
        }
        ConfirmAction::ClearAll => {
            state.tracks.clear();
            state.selected.clear();
            prune_selection(state);
            state.status = "File list cleared.".to_string();
            selection_changed(state)
        }
        ConfirmAction::DeleteArt => {
            stage_art_removal(state);
            Task::none()
        }
    }
}

pub(crate) fn move_selection(state: &mut Tagwright, dir: MoveDir) -> Task<Message> {
    if state.selected.is_empty() {
        return Task::none();
    }
    move_selected_rows(&mut state.tracks, &state.selected, dir);
    Task::none()
}

/// Shift every selected row one place. A selected row stops when it hits the
/// edge or another selected row that could not move.
pub(crate) fn move_selected_rows(rows: &mut [TrackRow], selected: &BTreeSet<TrackId>, dir: MoveDir) {
    let is_sel = |row: &TrackRow| row.id.is_some_and(|id| selected.contains(&id));

    match dir {
        MoveDir::Up => {
            for i in 1..rows.len() {
                if is_sel(&rows[i]) && !is_sel(&rows[i - 1]) {
                    rows.swap(i, i - 1);
                }
            }
        }
        MoveDir::Down => {
            for i in (0..rows.len().saturating_sub(1)).rev() {
                if is_sel(&rows[i]) && !is_sel(&rows[i + 1]) {
                    rows.swap(i, i + 1);
                }
            }
        }
    }
}
