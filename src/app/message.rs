// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::SessionError;
use crate::domain::session::{AccessToken, Subject, UserProfile};
use crate::ui::auth_panel::{view as panel_view, PanelKey};
use crate::ui::notifications;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Panel(panel_view::Message),
    Notification(notifications::ToastEvent),
    /// Next animation frame.
    Frame(Instant),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
    /// Periodic check for changes made by other instances.
    PollStorage,
    /// Tab or Escape, wherever focus is.
    KeyPressed { key: PanelKey, shift: bool },
    /// A mouse button went down anywhere in the window.
    PointerPressed,
    LoginCompleted(Result<AccessToken, SessionError>),
    ProfileLoaded {
        subject: Subject,
        result: Result<Option<UserProfile>, SessionError>,
    },
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional backend URL, overriding `[session] api_base_url`.
    pub api_base_url: Option<String>,
    /// Optional JSON payload of a toast shown at startup.
    pub initial_toast: Option<String>,
    /// Optional path the diagnostics report is written to on exit.
    pub diagnostics_out: Option<String>,
}
