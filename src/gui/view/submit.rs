//! gui/view/submit.rs
//! Right panel: new release draft for the MusicBrainz release editor.

use iced::widget::{column, container, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::help;
use super::super::state::{Message, Panel, Tagwright};
use super::constants::{HEADER_TEXT, LABEL_W, SMALL_TEXT};
use super::widgets::{action_button, field_row, hover};
use crate::musicbrainz::submit::ReleaseType;

pub(crate) fn build_submit_panel(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let draft = &state.submit;

    let release_type = row![
        text("Type").width(Length::Fixed(LABEL_W)),
        pick_list(
            ReleaseType::ALL,
            Some(draft.release_type),
            Message::SubmitTypeChanged
        ),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let header = row![
        text("#").size(HEADER_TEXT).width(Length::Fixed(40.0)),
        text("Title").size(HEADER_TEXT).width(Length::Fill),
        text("Length").size(HEADER_TEXT).width(Length::Fixed(70.0)),
    ]
    .spacing(8);

    let mut tracks = column![header].spacing(4);
    for (i, track) in draft.tracks.iter().enumerate() {
        tracks = tracks.push(
            row![
                text(track.number.as_str()).width(Length::Fixed(40.0)),
                text_input("", &track.title)
                    .on_input(move |s| Message::SubmitTrackTitleChanged(i, s))
                    .width(Length::Fill),
                text(track.duration_text()).width(Length::Fixed(70.0)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    let open_btn = action_button(
        "Open MusicBrainz release editor",
        Some(Message::OpenReleaseEditor),
    );

    let body = scrollable(
        column![
            text("Submit to MusicBrainz").size(18),
            text("The release editor opens in your browser; sign in there to finish. Edits are reviewed by the community.")
                .size(SMALL_TEXT),
            field_row("Album Artist", "", &draft.album_artist, Message::SubmitArtistChanged),
            field_row("Album Title", "", &draft.album_title, Message::SubmitTitleChanged),
            field_row(
                "Release Date",
                "YYYY-MM-DD",
                &draft.release_date,
                Message::SubmitDateChanged
            ),
            release_type,
            tracks,
        ]
        .spacing(10),
    )
    .height(Length::Fill);

    let buttons = row![
        hover(open_btn, help::RELEASE_EDITOR),
        action_button("Back", Some(Message::ShowPanel(Panel::Editor))),
    ]
    .spacing(8);

    container(column![body, buttons].spacing(12)).padding(12)
}
