//! Top toolbar.

use iced::widget::{container, row};
use iced::{Alignment, Length};

use super::super::help;
use super::super::state::{Message, Panel, Tagwright};
use super::constants::TOOLBAR_H;
use super::widgets::{action_button, hover};

pub(crate) fn build_toolbar(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let idle = state.busy.is_none();
    let has_files = !state.tracks.is_empty();
    let has_selection = !state.selected.is_empty();
    let mb = state.musicbrainz_enabled();

    let when = |ok: bool, msg: Message| ok.then_some(msg);

    let bar = row![
        hover(
            action_button("Load Files", when(idle, Message::LoadFilesPressed)),
            help::LOAD
        ),
        hover(
            action_button(
                "Remove",
                when(idle && has_selection, Message::RemoveSelectedPressed)
            ),
            help::REMOVE
        ),
        hover(
            action_button("Clear", when(idle && has_files, Message::ClearAllPressed)),
            help::CLEAR
        ),
        hover(
            action_button(
                "MusicBrainz Search",
                when(idle && mb, Message::ShowPanel(Panel::Search))
            ),
            help::SEARCH
        ),
        hover(
            action_button(
                "Submit",
                when(idle && mb && has_selection, Message::ShowPanel(Panel::Submit))
            ),
            help::SUBMIT
        ),
        hover(
            action_button(
                "Rename",
                when(idle && has_selection, Message::ShowPanel(Panel::Rename))
            ),
            help::RENAME
        ),
        hover(
            action_button("Settings", when(idle, Message::ShowPanel(Panel::Setup))),
            help::SETTINGS
        ),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(bar)
        .height(Length::Fixed(TOOLBAR_H))
        .center_y(Length::Fixed(TOOLBAR_H))
}
