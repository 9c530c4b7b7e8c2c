//! gui/view/search.rs
//! Right panel: MusicBrainz search + apply.

use iced::widget::{column, container, mouse_area, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::help;
use super::super::state::{Message, Panel, Tagwright};
use super::constants::{FILE_ROW_HPAD, FILE_ROW_VPAD, LABEL_W, MARKER_W, RESULT_LIST_H, ROW_TEXT, SMALL_TEXT};
use super::widgets::{action_button, hover};
use crate::musicbrainz::SEARCH_LIMIT;

fn input_row<'a>(
    label: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> iced::widget::Row<'a, Message> {
    row![
        text(label).width(Length::Fixed(LABEL_W)),
        text_input("", value)
            .on_input(on_input)
            .on_submit(Message::RunSearch)
            .width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

fn build_results(state: &Tagwright) -> iced::widget::Scrollable<'_, Message> {
    let mut col = column![].spacing(1);

    for (i, summary) in state.search.results.iter().enumerate() {
        let marker = if state.search.selected == Some(i) { "▶" } else { "" };
        let line = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(MARKER_W)),
            text(summary.display_line()).size(ROW_TEXT).width(Length::Fill),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        col = col.push(
            mouse_area(
                container(line)
                    .padding([FILE_ROW_VPAD, FILE_ROW_HPAD])
                    .width(Length::Fill),
            )
            .on_press(Message::ResultSelected(i)),
        );
    }

    scrollable(col).height(Length::Fixed(RESULT_LIST_H))
}

pub(crate) fn build_search_panel(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let search = &state.search;

    let search_btn = action_button(
        if search.searching { "Searching..." } else { "Search" },
        (!search.searching).then_some(Message::RunSearch),
    );

    let apply_btn = action_button(
        if search.fetching { "Fetching..." } else { "Apply" },
        state.can_apply_release().then_some(Message::ApplyRelease),
    );

    let summary = if search.results.is_empty() {
        String::new()
    } else {
        format!(
            "{} result(s) (at most {SEARCH_LIMIT}). Apply writes to {} selected file(s).",
            search.results.len(),
            state.selected.len()
        )
    };

    let mut body = column![
        text("MusicBrainz search").size(18),
        input_row("Artist", &search.artist, Message::SearchArtistChanged),
        input_row("Album", &search.album, Message::SearchAlbumChanged),
        search_btn,
        build_results(state),
        text(summary).size(SMALL_TEXT),
    ]
    .spacing(10);

    if let Some(message) = &search.message {
        body = body.push(text(message.as_str()));
    }

    body = body.push(
        row![
            hover(apply_btn, help::APPLY),
            action_button("Back", Some(Message::ShowPanel(Panel::Editor))),
        ]
        .spacing(8),
    );

    container(body).padding(12)
}
