//! File list (center).

use iced::widget::{Column, column, container, mouse_area, row, scrollable, text};
use iced::{Alignment, Length};

use super::super::help;
use super::super::state::{Message, MoveDir, Tagwright};
use super::constants::{
    FILE_LIST_SPACING, FILE_ROW_H, FILE_ROW_HPAD, FILE_ROW_VPAD, HEADER_TEXT, MARKER_W, ROW_TEXT,
};
use super::widgets::{action_button, hover};

pub(crate) fn build_file_list(state: &Tagwright) -> Column<'_, Message> {
    let header = text(format!(
        "Files ({} loaded, {} selected)",
        state.tracks.len(),
        state.selected.len()
    ))
    .size(HEADER_TEXT);

    let can_move = state.busy.is_none() && !state.selected.is_empty();
    let move_buttons = row![
        action_button("Move up", can_move.then_some(Message::MoveSelection(MoveDir::Up))),
        action_button(
            "Move down",
            can_move.then_some(Message::MoveSelection(MoveDir::Down))
        ),
    ]
    .spacing(8);

    column![
        header,
        hover(build_rows(state), help::FILE_LIST),
        hover(move_buttons, help::MOVE),
    ]
    .spacing(8)
}

fn build_rows(state: &Tagwright) -> iced::widget::Scrollable<'_, Message> {
    if state.tracks.is_empty() {
        return scrollable(
            container(text("No files loaded. Use Load Files or drop files here.").size(ROW_TEXT))
                .padding(FILE_ROW_HPAD),
        )
        .height(Length::Fill);
    }

    let mut col = column![].spacing(FILE_LIST_SPACING);

    for t in &state.tracks {
        let is_selected = state.is_selected(t);
        let is_anchor = is_selected && t.id.is_some() && t.id == state.anchor;

        // The anchor of the selection gets ▶. Other selected rows get ●.
        let marker = if is_anchor {
            "▶"
        } else if is_selected {
            "●"
        } else {
            ""
        };

        let cells = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(MARKER_W)),
            text(t.list_label()).size(ROW_TEXT).width(Length::Fill),
            text(t.format.label()).size(ROW_TEXT),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let cell = container(cells)
            .padding([FILE_ROW_VPAD, FILE_ROW_HPAD])
            .height(Length::Fixed(FILE_ROW_H))
            .width(Length::Fill);

        match t.id {
            Some(id) => col = col.push(mouse_area(cell).on_press(Message::RowClicked(id))),
            None => col = col.push(cell),
        }
    }

    scrollable(col).height(Length::Fill)
}
