//! gui/update/editor.rs
//!
//! Tag editor draft: load from selection, edit, save through the worker.

use std::path::PathBuf;

use iced::Task;

use super::super::state::{EditorDraft, JobKind, Message, Tagwright};
use super::worker::start_job;
use crate::core::types::{TagEdit, TagField};
use crate::core::worker::WorkerCommand;

/// Reset the draft from the current selection (pending edits are dropped).
pub(crate) fn load_editor_from_selection(state: &mut Tagwright) {
    let rows = state.selected_rows();

    let mut draft = EditorDraft {
        batch: rows.len() > 1,
        ..Default::default()
    };

    if let [row] = rows.as_slice() {
        for (field, value) in row.tags.iter() {
            draft.values.insert(field, value.to_string());
        }
    }

    state.editor = draft;
}

pub(crate) fn field_changed(state: &mut Tagwright, field: TagField, value: String) -> Task<Message> {
    state.editor.values.insert(field, value);
    state.editor.dirty = true;
    Task::none()
}

pub(crate) fn apply_toggled(state: &mut Tagwright, field: TagField, on: bool) -> Task<Message> {
    if on {
        state.editor.apply.insert(field);
    } else {
        state.editor.apply.remove(&field);
    }
    state.editor.dirty = true;
    Task::none()
}

pub(crate) fn revert_edits(state: &mut Tagwright) -> Task<Message> {
    load_editor_from_selection(state);
    state.status = "Edits discarded.".to_string();
    Task::none()
}

/// The edit for one selected file: every field (single) or only checked ones (batch).
pub(crate) fn edit_from_draft(draft: &EditorDraft) -> TagEdit {
    let mut edit = TagEdit::default();

    for field in TagField::ALL {
        if draft.batch && !draft.apply.contains(&field) {
            continue;
        }
        edit.set(field, draft.value(field));
    }

    edit.art = draft.art.clone();
    edit
}

pub(crate) fn build_save_jobs(draft: &EditorDraft, paths: Vec<PathBuf>) -> Vec<(PathBuf, TagEdit)> {
    let edit = edit_from_draft(draft);
    if edit.is_empty() {
        return Vec::new();
    }
    paths.into_iter().map(|p| (p, edit.clone())).collect()
}

pub(crate) fn save_edits(state: &mut Tagwright) -> Task<Message> {
    if state.busy.is_some() {
        return Task::none();
    }

    let paths = state.selected_paths();
    if paths.is_empty() {
        state.status = "Select a file first.".to_string();
        return Task::none();
    }

    let jobs = build_save_jobs(&state.editor, paths);
    if jobs.is_empty() {
        state.status = "Nothing to save: tick the fields you want to apply.".to_string();
        return Task::none();
    }

    let count = jobs.len();
    if start_job(state, JobKind::Saving, WorkerCommand::SaveEdits(jobs)) {
        state.status = if count == 1 {
            "Writing tags to file...".to_string()
        } else {
            format!("Writing tags to {count} files...")
        };
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ArtChange, CoverArt};

    fn draft(batch: bool) -> EditorDraft {
        let mut d = EditorDraft {
            batch,
            ..Default::default()
        };
        d.values.insert(TagField::Title, "Song".into());
        d.values.insert(TagField::Genre, "Rock".into());
        d
    }

    #[test]
    fn single_selection_writes_every_field() {
        let edit = edit_from_draft(&draft(false));
        assert_eq!(edit.fields.len(), TagField::ALL.len());
        assert_eq!(edit.fields[&TagField::Title].as_deref(), Some("Song"));
        // Blank fields become deletions.
        assert_eq!(edit.fields[&TagField::Artist], None);
    }

    #[test]
    fn batch_writes_only_checked_fields() {
        let mut d = draft(true);
        d.apply.insert(TagField::Genre);
        d.apply.insert(TagField::Comment);

        let edit = edit_from_draft(&d);
        assert_eq!(edit.fields.len(), 2);
        assert_eq!(edit.fields[&TagField::Genre].as_deref(), Some("Rock"));
        assert_eq!(edit.fields[&TagField::Comment], None);
        assert!(!edit.fields.contains_key(&TagField::Title));
    }

    #[test]
    fn batch_with_nothing_checked_saves_nothing() {
        let jobs = build_save_jobs(&draft(true), vec![PathBuf::from("/a.mp3")]);
        assert!(jobs.is_empty());
    }

    #[test]
    fn art_change_alone_is_saved_for_every_file() {
        let mut d = draft(true);
        d.art = Some(ArtChange::Replace(CoverArt {
            data: vec![1],
            mime: "image/png".into(),
        }));
        let jobs = build_save_jobs(&d, vec![PathBuf::from("/a.mp3"), PathBuf::from("/b.ogg")]);
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(|(_, e)| e.fields.is_empty() && e.art.is_some()));
    }
}
