//! gui/view/editor.rs
//! Right panel: tag editor + album art.

use iced::widget::{Column, column, container, row, scrollable, text};
use iced::{Alignment, Length};

use super::super::help;
use super::super::state::{Message, Tagwright};
use super::constants::{COVER_BIG, SMALL_TEXT};
use super::widgets::{action_button, cover_view, hover, tag_field_row};
use crate::core::types::{ArtChange, TagField};

fn art_caption(state: &Tagwright) -> &'static str {
    match &state.editor.art {
        Some(ArtChange::Remove) => "Art will be deleted on save",
        Some(ArtChange::Replace(_)) => "New art will be saved",
        None if state.editor.batch => "Several files selected",
        None if state.art_preview().is_some() => "Embedded album art",
        None => match state.single_selected() {
            Some(t) if t.has_art => "Loading...",
            _ => "No album art",
        },
    }
}

fn build_art(state: &Tagwright) -> Column<'_, Message> {
    let idle = state.busy.is_none();

    let buttons = row![
        hover(
            action_button("Change Art", idle.then_some(Message::ChangeArtPressed)),
            help::CHANGE_ART
        ),
        hover(
            action_button("Delete Art", idle.then_some(Message::DeleteArtPressed)),
            help::DELETE_ART
        ),
    ]
    .spacing(8);

    column![
        hover(
            cover_view(state.art_preview(), COVER_BIG, art_caption(state)),
            help::ART
        ),
        text(art_caption(state)).size(SMALL_TEXT),
        buttons,
    ]
    .spacing(6)
    .align_x(Alignment::Center)
}

pub(crate) fn build_editor_panel(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let rows = state.selected_rows();

    if rows.is_empty() {
        return container(
            column![
                text("Tag editor").size(18),
                text("Select one or more files (center panel)."),
            ]
            .spacing(8),
        )
        .padding(12);
    }

    let heading = match rows.as_slice() {
        [one] => {
            let duration = one
                .duration_ms
                .map(crate::musicbrainz::submit::format_duration)
                .unwrap_or_else(|| "-".to_string());
            column![
                text(one.file_name()).size(16),
                text(format!("{} | {}", one.format.label(), duration)).size(SMALL_TEXT),
                text(one.path.display().to_string()).size(SMALL_TEXT),
            ]
        }
        many => column![
            text(format!("{} files selected", many.len())).size(16),
            text("Only ticked fields are written to every selected file.").size(SMALL_TEXT),
        ],
    }
    .spacing(4);

    let idle = state.busy.is_none();

    let mut fields = column![].spacing(8);
    for field in TagField::ALL {
        fields = fields.push(tag_field_row(&state.editor, field, idle));
    }

    let save_btn = action_button(
        "Save",
        (idle && state.editor.dirty).then_some(Message::SaveEdits),
    );
    let revert_btn = action_button(
        "Revert",
        (idle && state.editor.dirty).then_some(Message::RevertEdits),
    );
    let buttons = row![hover(save_btn, help::SAVE), revert_btn].spacing(8);

    let body = scrollable(
        column![
            text("Tag editor").size(18),
            heading,
            build_art(state),
            fields,
        ]
        .spacing(12),
    )
    .height(Length::Fill);

    container(column![body, buttons].spacing(12)).padding(12)
}
