//! Bottom area: info line, confirmation bar, status + progress.

use iced::widget::{Column, column, progress_bar, row, text};
use iced::{Alignment, Length};

use super::super::help;
use super::super::state::{Message, Tagwright};
use super::constants::SMALL_TEXT;
use super::widgets::{action_button, hover};

pub(crate) fn build_status_area(state: &Tagwright) -> Column<'_, Message> {
    let mut col = column![text(state.info).size(SMALL_TEXT)].spacing(6);

    if let Some(action) = state.confirm {
        col = col.push(
            row![
                text(action.question(state.selected.len())).width(Length::Fill),
                action_button("Yes", Some(Message::ConfirmYes)),
                action_button("No", Some(Message::ConfirmNo)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    let mut status = row![text(state.status.as_str()).width(Length::Fill)]
        .spacing(10)
        .align_y(Alignment::Center);

    if let Some(kind) = state.busy {
        let (done, total) = state.progress.unwrap_or((0, 0));
        let value = if total == 0 { 0.0 } else { done as f32 / total as f32 };

        status = status
            .push(text(format!("{} {done}/{total}", kind.label())).size(SMALL_TEXT))
            .push(progress_bar(0.0..=1.0, value).length(Length::Fixed(200.0)))
            .push(hover(
                action_button("Stop", Some(Message::StopJob)),
                help::STOP,
            ));
    }

    col.push(status)
}
