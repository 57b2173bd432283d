// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! This module defines the events captured while the auth bar runs: what the
//! user did with the panel and session, how session state changed, and the
//! warnings and errors surfaced as notifications.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{ErrorType, WarningType};

/// Why the panel closed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The toggle affordance was activated.
    Toggle,
    /// A pointer press landed outside the panel and toggle.
    OutsideClick,
    /// Escape was pressed inside the panel.
    Escape,
}

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Panel Actions
    // ==========================================================================
    /// The account panel was opened.
    OpenPanel,

    /// The account panel was closed.
    ClosePanel {
        /// What closed it.
        reason: CloseReason,
    },

    // ==========================================================================
    // Session Actions
    // ==========================================================================
    /// A login request was sent.
    Login,

    /// The user logged out.
    Logout,

    /// The acting user id was changed.
    SetActingUser,

    // ==========================================================================
    // Notification Actions
    // ==========================================================================
    /// A notification was dismissed with its close affordance.
    DismissNotification,
}

/// Application state changes worth correlating with user actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// The application finished booting.
    Started,

    /// The session moved between signed-in and signed-out.
    SessionChanged {
        /// Whether a token is now present.
        signed_in: bool,
    },

    /// Another instance changed a watched storage key.
    ExternalStorageChange {
        /// The storage key that changed.
        key: String,
    },

    /// A profile display name became available.
    ProfileResolved {
        /// Whether it came from the local cache.
        from_cache: bool,
    },
}

/// A non-critical issue, usually one the user also saw as a notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    /// Category of the warning.
    pub warning_type: WarningType,
    /// Sanitized description.
    pub message: String,
}

impl WarningEvent {
    /// Creates a warning event.
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// A failed operation, usually one the user also saw as a notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    /// Category of the error.
    pub error_type: ErrorType,
    /// Sanitized description.
    pub message: String,
}

impl ErrorEvent {
    /// Creates an error event.
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        /// The specific action performed.
        action: UserAction,
    },

    /// Application state change.
    AppState {
        /// The state transition.
        state: AppStateEvent,
    },

    /// Non-critical warning.
    Warning {
        /// Warning details.
        event: WarningEvent,
    },

    /// Operation failure.
    Error {
        /// Error details.
        event: ErrorEvent,
    },
}
