//! gui/update/window.rs
//!
//! Window geometry tracking, shutdown, and the first-run contact email setup.

use iced::{Point, Size, Task, window};

use super::super::state::{Message, Panel, Tagwright};
use crate::config::is_valid_contact_email;
use crate::musicbrainz::{ClientConfig, MusicBrainzClient};

pub(crate) fn resized(state: &mut Tagwright, size: Size) -> Task<Message> {
    state.window.width = size.width;
    state.window.height = size.height;
    Task::none()
}

pub(crate) fn moved(state: &mut Tagwright, at: Point) -> Task<Message> {
    state.window.x = Some(at.x);
    state.window.y = Some(at.y);
    Task::none()
}

/// Save settings, stop the worker, then close.
pub(crate) fn close_requested(state: &mut Tagwright, _id: window::Id) -> Task<Message> {
    state.settings.window = state.window.clamped();
    if let Err(e) = state.settings.save() {
        tracing::warn!(error = %e, "could not save settings on exit");
    }

    if let Some(worker) = state.worker.take() {
        worker.shutdown();
    }
    state.worker_events = None;

    tracing::info!("shutting down");
    iced::exit()
}

pub(crate) fn setup_email_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.setup_email = s;
    Task::none()
}

pub(crate) fn save_contact_email(state: &mut Tagwright) -> Task<Message> {
    let email = state.setup_email.trim().to_string();
    if !is_valid_contact_email(&email) {
        state.status = "Please enter a valid email address.".to_string();
        return Task::none();
    }

    match ClientConfig::new(&email).and_then(MusicBrainzClient::new) {
        Ok(client) => state.mb_client = Some(client),
        Err(e) => {
            state.status = format!("MusicBrainz setup failed: {e}");
            return Task::none();
        }
    }

    state.settings.contact_email = Some(email);
    if let Err(e) = state.settings.save() {
        tracing::warn!(error = %e, "could not save contact email");
    }

    state.status = "Contact email saved. MusicBrainz is enabled.".to_string();
    state.panel = Panel::Editor;
    Task::none()
}

pub(crate) fn skip_setup(state: &mut Tagwright) -> Task<Message> {
    state.status = "MusicBrainz features are disabled until a contact email is set.".to_string();
    state.panel = Panel::Editor;
    Task::none()
}
