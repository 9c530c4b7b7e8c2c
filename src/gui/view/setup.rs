//! gui/view/setup.rs
//! Right panel: contact email for MusicBrainz requests.

use iced::widget::{column, container, row, text};

use super::super::state::{Message, Tagwright};
use super::constants::SMALL_TEXT;
use super::widgets::{action_button, field_row};
use crate::config::is_valid_contact_email;

pub(crate) fn build_setup_panel(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let save = is_valid_contact_email(&state.setup_email).then_some(Message::SaveContactEmail);

    let current = match state.settings.contact() {
        Some(email) => format!("MusicBrainz is enabled ({email})."),
        None => "MusicBrainz is disabled until a contact email is set.".to_string(),
    };

    container(
        column![
            text("MusicBrainz contact").size(18),
            text(
                "MusicBrainz asks every application to identify itself with a contact address. \
                 It is sent in the User-Agent of each request and stored in your settings."
            )
            .size(SMALL_TEXT),
            field_row(
                "Email",
                "you@example.com",
                &state.setup_email,
                Message::SetupEmailChanged
            ),
            text(current).size(SMALL_TEXT),
            row![
                action_button("Save", save),
                action_button("Skip", Some(Message::SkipSetup)),
            ]
            .spacing(8),
        ]
        .spacing(10),
    )
    .padding(12)
}
