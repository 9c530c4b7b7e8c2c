//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod editor;
mod files;
mod rename;
mod search;
mod setup;
mod status;
mod submit;
mod toolbar;
mod widgets;

use iced::widget::{Column, column, container, row};
use iced::{Element, Length};

use super::state::{Message, Panel, Tagwright};
use constants::PANEL_W;

pub(crate) fn view(state: &Tagwright) -> Column<'_, Message> {
    let toolbar = toolbar::build_toolbar(state);

    let center = container(files::build_file_list(state))
        .padding(12)
        .width(Length::Fill);

    let panel: Element<'_, Message> = match state.panel {
        Panel::Editor => editor::build_editor_panel(state).into(),
        Panel::Search => search::build_search_panel(state).into(),
        Panel::Submit => submit::build_submit_panel(state).into(),
        Panel::Rename => rename::build_rename_panel(state).into(),
        Panel::Setup => setup::build_setup_panel(state).into(),
    };
    let panel = container(panel).width(Length::Fixed(PANEL_W)).height(Length::Fill);

    let body = row![center, panel].spacing(12).height(Length::Fill);
    column![toolbar, body, status::build_status_area(state)]
        .spacing(12)
        .padding(12)
}
