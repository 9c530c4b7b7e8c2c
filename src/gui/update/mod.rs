//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::help;
use super::state::{Message, Panel, Tagwright};

mod art;
mod editor;
mod files;
mod helpers;
mod rename;
mod search;
mod selection;
mod submit;
mod window;
mod worker;

pub(crate) fn update(state: &mut Tagwright, message: Message) -> Task<Message> {
    match message {
        Message::Tick => worker::tick(state),

        // Window
        Message::FileDropped(path) => files::file_dropped(state, path),
        Message::WindowResized(size) => window::resized(state, size),
        Message::WindowMoved(at) => window::moved(state, at),
        Message::CloseRequested(id) => window::close_requested(state, id),
        Message::ModifiersChanged(mods) => selection::modifiers_changed(state, mods),

        // Hover help
        Message::Hover(text) => {
            state.info = text;
            Task::none()
        }
        Message::HoverEnd => {
            state.info = help::IDLE;
            Task::none()
        }

        // File list
        Message::LoadFilesPressed => files::load_files_pressed(state),
        Message::FilesPicked(paths) => files::files_picked(state, paths),
        Message::RowClicked(id) => selection::row_clicked(state, id),
        Message::MoveSelection(dir) => files::move_selection(state, dir),
        Message::RemoveSelectedPressed => files::remove_selected_pressed(state),
        Message::ClearAllPressed => files::clear_all_pressed(state),
        Message::ConfirmYes => files::confirm_yes(state),
        Message::ConfirmNo => files::confirm_no(state),
        Message::StopJob => worker::stop_job(state),

        // Panels
        Message::ShowPanel(panel) => show_panel(state, panel),

        // Editor
        Message::FieldChanged(field, value) => editor::field_changed(state, field, value),
        Message::ApplyToggled(field, on) => editor::apply_toggled(state, field, on),
        Message::SaveEdits => editor::save_edits(state),
        Message::RevertEdits => editor::revert_edits(state),

        // Art
        Message::ChangeArtPressed => art::change_art_pressed(state),
        Message::ArtPicked(path) => art::art_picked(state, path),
        Message::ArtPrepared(result) => art::art_prepared(state, result),
        Message::DeleteArtPressed => art::delete_art_pressed(state),
        Message::CoverLoaded(id, handle) => art::cover_loaded(state, id, handle),

        // Search + apply
        Message::SearchArtistChanged(s) => search::artist_changed(state, s),
        Message::SearchAlbumChanged(s) => search::album_changed(state, s),
        Message::RunSearch => search::run_search(state),
        Message::SearchFinished(result) => search::search_finished(state, result),
        Message::ResultSelected(i) => search::result_selected(state, i),
        Message::ApplyRelease => search::apply_release(state),
        Message::ReleaseFetched(result) => search::release_fetched(state, result),

        // Submit
        Message::SubmitArtistChanged(s) => submit::artist_changed(state, s),
        Message::SubmitTitleChanged(s) => submit::title_changed(state, s),
        Message::SubmitDateChanged(s) => submit::date_changed(state, s),
        Message::SubmitTypeChanged(t) => submit::type_changed(state, t),
        Message::SubmitTrackTitleChanged(i, s) => submit::track_title_changed(state, i, s),
        Message::OpenReleaseEditor => submit::open_release_editor(state),
        Message::ReleaseEditorOpened(result) => submit::release_editor_opened(state, result),

        // Rename
        Message::RenamePatternChanged(s) => rename::pattern_changed(state, s),
        Message::RunRename => rename::run_rename(state),

        // Setup
        Message::SetupEmailChanged(s) => window::setup_email_changed(state, s),
        Message::SaveContactEmail => window::save_contact_email(state),
        Message::SkipSetup => window::skip_setup(state),
    }
}

fn show_panel(state: &mut Tagwright, panel: Panel) -> Task<Message> {
    match panel {
        Panel::Search => search::open_search(state),
        Panel::Submit => submit::open_submit(state),
        Panel::Rename => rename::open_rename(state),
        Panel::Editor | Panel::Setup => {
            state.panel = panel;
            Task::none()
        }
    }
}
