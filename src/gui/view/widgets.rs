//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, checkbox, column, container, image, mouse_area, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::super::help;
use super::super::state::{EditorDraft, Message};
use super::constants::{CHECK_W, LABEL_W};
use crate::core::types::TagField;

/// Placeholder shown in batch mode until the field's box is ticked.
pub(crate) const BATCH_PLACEHOLDER: &str = "Check box to apply change";

/// Show `help_text` in the info line while the pointer is over `content`.
pub(crate) fn hover<'a>(
    content: impl Into<Element<'a, Message>>,
    help_text: &'static str,
) -> Element<'a, Message> {
    mouse_area(content)
        .on_enter(Message::Hover(help_text))
        .on_exit(Message::HoverEnd)
        .into()
}

/// A button that is greyed out (no `on_press`) when `msg` is `None`.
pub(crate) fn action_button<'a>(
    label: impl Into<String>,
    msg: Option<Message>,
) -> iced::widget::Button<'a, Message> {
    let label = text(label.into());
    match msg {
        Some(m) => button(label).on_press(m),
        None => button(label),
    }
}

pub(crate) fn cover_placeholder(size: f32, caption: &str) -> iced::widget::Container<'_, Message> {
    container(
        column![text("♪").size(28), text(caption).size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fill)
    .center_y(Length::Fill)
}

/// If `handle` exists, show it; otherwise show the placeholder.
pub(crate) fn cover_view<'a>(
    handle: Option<iced::widget::image::Handle>,
    size: f32,
    caption: &'a str,
) -> Element<'a, Message> {
    match handle {
        Some(h) => container(image(h).width(Length::Fixed(size)).height(Length::Fixed(size)))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        None => cover_placeholder(size, caption).into(),
    }
}

pub(crate) fn field_row<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> iced::widget::Row<'a, Message> {
    row![
        text(label).width(Length::Fixed(LABEL_W)),
        text_input(placeholder, value).on_input(on_input).width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

/// One tag field of the editor. Batch mode adds the "apply" checkbox.
pub(crate) fn tag_field_row(draft: &EditorDraft, field: TagField, enabled: bool) -> Element<'_, Message> {
    let placeholder = if draft.batch { BATCH_PLACEHOLDER } else { "" };

    let mut input = text_input(placeholder, draft.value(field)).width(Length::Fill);
    if enabled {
        input = input.on_input(move |s| Message::FieldChanged(field, s));
    }

    let label = text(field.label()).width(Length::Fixed(LABEL_W));

    let line = if draft.batch {
        let mut tick = checkbox(draft.apply.contains(&field));
        if enabled {
            tick = tick.on_toggle(move |on| Message::ApplyToggled(field, on));
        }
        row![container(tick).width(Length::Fixed(CHECK_W)), label, input]
    } else {
        row![label, input]
    };

    hover(
        line.spacing(8).align_y(Alignment::Center),
        help::field_help(field),
    )
}
