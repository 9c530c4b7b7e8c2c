//! gui/update/rename.rs
//! Rename panel: pattern input, then rename the selected files on the worker.

use iced::Task;

use super::super::state::{JobKind, Message, Panel, Tagwright};
use super::worker::start_job;
use crate::core::worker::WorkerCommand;

pub(crate) fn open_rename(state: &mut Tagwright) -> Task<Message> {
    if state.selected.is_empty() {
        state.status = "Select the files to rename first.".to_string();
        return Task::none();
    }
    state.rename_input = state.settings.rename_pattern.clone();
    state.panel = Panel::Rename;
    Task::none()
}

pub(crate) fn pattern_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.rename_input = s;
    Task::none()
}

pub(crate) fn run_rename(state: &mut Tagwright) -> Task<Message> {
    let pattern = state.rename_input.trim().to_string();
    if pattern.is_empty() {
        state.status = "Enter a file name pattern.".to_string();
        return Task::none();
    }

    let paths = state.selected_paths();
    if paths.is_empty() {
        state.status = "Select the files to rename first.".to_string();
        return Task::none();
    }

    if state.settings.rename_pattern != pattern {
        state.settings.rename_pattern = pattern.clone();
        if let Err(e) = state.settings.save() {
            tracing::warn!(error = %e, "could not save rename pattern");
        }
    }

    let count = paths.len();
    if start_job(state, JobKind::Renaming, WorkerCommand::RenameFiles { paths, pattern }) {
        state.status = format!("Renaming {count} file(s)...");
        state.panel = Panel::Editor;
    }
    Task::none()
}
