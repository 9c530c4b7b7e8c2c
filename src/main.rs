//! Tagwright
//!
//! # What this program is
//! A desktop tag editor (built with the `iced` GUI library) for MP3, FLAC,
//! M4A and Ogg files: edit tags and album art one file at a time or in batch,
//! fill them from MusicBrainz releases, seed new releases into the MusicBrainz
//! release editor, and rename files from their tags.
//!
//! # How the pieces fit
//! - `Tagwright` = the app's state
//! - `Message` = something happened (button, typing, a background result)
//! - `update(state, message)` applies it and may start a `Task`
//! - `view(state)` draws the current state
//!
//! # Concurrency model
//! - File jobs (load, save, apply release, rename) run on one worker thread
//!   (`core::worker`); its events are drained on a timer tick.
//! - Network requests run as iced tasks on the tokio executor.
//! - The UI thread never reads or writes audio files directly.
//!
//! # Layers
//! - `core`: formats, tags, art, rename, batch jobs, worker (no iced)
//! - `musicbrainz`: web service client, release mapping, release seeding (no iced)
//! - `config`: persisted settings
//! - `gui`: state, update, view, subscriptions

mod config;
mod core;
mod gui;
mod musicbrainz;

use iced::{Point, Size, window};
use tracing_subscriber::EnvFilter;

use crate::config::{APP_NAME, MIN_HEIGHT, MIN_WIDTH, Settings};
use crate::gui::{Tagwright, subscription, update, view};

const DEFAULT_LOG_FILTER: &str = "tagwright=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn window_settings(settings: &Settings) -> window::Settings {
    let geometry = settings.window.clamped();

    let position = match (geometry.x, geometry.y) {
        (Some(x), Some(y)) => window::Position::Specific(Point::new(x, y)),
        _ => window::Position::default(),
    };

    window::Settings {
        size: Size::new(geometry.width, geometry.height),
        position,
        min_size: Some(Size::new(MIN_WIDTH, MIN_HEIGHT)),
        // Settings are saved and the worker joined before closing.
        exit_on_close_request: false,
        ..Default::default()
    }
}

fn main() -> iced::Result {
    init_tracing();

    let settings = Settings::load();
    tracing::info!(
        contact = settings.contact().is_some(),
        "starting {APP_NAME} {}",
        config::APP_VERSION
    );

    let window = window_settings(&settings);

    iced::application(move || Tagwright::new(settings.clone()), update, view)
        .title(APP_NAME)
        .subscription(subscription)
        .window(window)
        .run()
}
