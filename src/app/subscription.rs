// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native keyboard and mouse events are routed to the panel controller
//! regardless of which widget captured them: Tab, Escape and outside
//! presses must reach the focus trap even while a text field has focus.

use super::Message;
use crate::config;
use crate::ui::auth_panel::PanelKey;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, mouse, time, window, Subscription};
use std::time::Duration;

/// Routes Tab, Escape, mouse presses and close requests.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            let key = match key {
                Key::Named(Named::Tab) => PanelKey::Tab,
                Key::Named(Named::Escape) => PanelKey::Escape,
                _ => return None,
            };
            Some(Message::KeyPressed {
                key,
                shift: modifiers.shift(),
            })
        }
        event::Event::Mouse(mouse::Event::ButtonPressed(_)) => Some(Message::PointerPressed),
        _ => None,
    })
}

/// Creates the frame subscription while toasts are entering or fading out.
pub fn create_frame_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        window::frames().map(Message::Frame)
    } else {
        Subscription::none()
    }
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(config::TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Creates the subscription polling the session store for changes made by
/// other instances.
pub fn create_storage_subscription() -> Subscription<Message> {
    time::every(Duration::from_millis(config::STORAGE_POLL_INTERVAL_MS))
        .map(|_| Message::PollStorage)
}
