//! gui/subscription.rs
//! Window/keyboard events, plus a periodic Tick while the worker has
//! something for us (running job or queued drops).

use iced::{Event, Subscription, event, keyboard, time, window};
use std::time::Duration;

use super::state::{Message, Tagwright};

const TICK_MS: u64 = 100;

pub(crate) fn subscription(state: &Tagwright) -> Subscription<Message> {
    let events = event::listen_with(map_event);

    if state.busy.is_none() && state.pending_drops.is_empty() {
        return events;
    }

    Subscription::batch([
        events,
        time::every(Duration::from_millis(TICK_MS)).map(|_| Message::Tick),
    ])
}

fn map_event(event: Event, _status: event::Status, id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Window(window::Event::Moved(point)) => Some(Message::WindowMoved(point)),
        Event::Window(window::Event::CloseRequested) => Some(Message::CloseRequested(id)),
        Event::Keyboard(keyboard::Event::ModifiersChanged(mods)) => {
            Some(Message::ModifiersChanged(mods))
        }
        _ => None,
    }
}
