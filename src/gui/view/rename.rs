//! gui/view/rename.rs
//! Right panel: rename from tags.

use iced::widget::{column, container, row, text};

use super::super::state::{Message, Panel, Tagwright};
use super::constants::SMALL_TEXT;
use super::widgets::{action_button, field_row};
use crate::core::rename::{PLACEHOLDER_LEGEND, plan_rename};

/// What the first selected file would be called.
fn example_line(state: &Tagwright) -> String {
    let Some(first) = state.selected_rows().into_iter().next() else {
        return String::new();
    };
    match plan_rename(first, &state.rename_input) {
        Ok(Some(to)) => format!(
            "Example: {} -> {}",
            first.file_name(),
            to.file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        ),
        Ok(None) => format!("Example: {} (unchanged)", first.file_name()),
        Err(e) => format!("Example: {e}"),
    }
}

pub(crate) fn build_rename_panel(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let count = state.selected.len();
    let run = (state.busy.is_none() && count > 0).then_some(Message::RunRename);

    container(
        column![
            text("Rename files").size(18),
            field_row(
                "Pattern",
                PLACEHOLDER_LEGEND,
                &state.rename_input,
                Message::RenamePatternChanged
            ),
            text(format!("Placeholders: {PLACEHOLDER_LEGEND}")).size(SMALL_TEXT),
            text(example_line(state)).size(SMALL_TEXT),
            row![
                action_button(format!("Rename {count} file(s)"), run),
                action_button("Back", Some(Message::ShowPanel(Panel::Editor))),
            ]
            .spacing(8),
        ]
        .spacing(10),
    )
    .padding(12)
}
