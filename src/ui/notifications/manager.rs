// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` accepts requests, owns the live instances and their dismiss
//! timers, and drives them through their lifecycle on inbound events:
//!
//! - `Frame`: entering instances become visible and start their timer
//! - `Tick`: visible instances whose deadline passed start exiting
//! - pointer enter/leave: pause and resume with a shorter grace window
//! - `Dismiss`: immediate exit from any non-terminal state
//! - `ExitTransitionEnded`: the only way an instance is removed

use std::time::Instant;

use super::notification::{Notification, NotificationState};
use crate::application::port::{NotificationSurface, Notifier};
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType};
use crate::domain::notification::{Cause, NotificationId, NotificationRequest, Severity};
use crate::domain::ui::DisplayDuration;

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// The close affordance of a notification was activated.
    Dismiss(NotificationId),
    /// The pointer moved over a notification.
    PointerEntered(NotificationId),
    /// The pointer left a notification at the given time.
    PointerLeft(NotificationId, Instant),
    /// The next animation/layout frame.
    Frame(Instant),
    /// Periodic timer check.
    Tick(Instant),
    /// The surface finished the exit transition of a notification.
    ExitTransitionEnded(NotificationId),
}

/// Manages the live notifications.
#[derive(Debug)]
pub struct Manager<S> {
    /// Live notifications (oldest first, newest last).
    live: Vec<Notification>,
    /// Mount point; without one every submission is dropped.
    surface: Option<S>,
    /// Duration used when a request does not carry its own.
    default_duration: DisplayDuration,
    next_id: NotificationId,
    /// Optional diagnostics handle for logging warnings/errors.
    diagnostics: Option<DiagnosticsHandle>,
}

impl<S: NotificationSurface> Manager<S> {
    /// Creates a manager rendering into `surface`.
    ///
    /// Pass `None` when the host has no notification surface; the manager
    /// then accepts and drops every request.
    #[must_use]
    pub fn new(surface: Option<S>) -> Self {
        Self {
            live: Vec::new(),
            surface,
            default_duration: DisplayDuration::default(),
            next_id: NotificationId::new(0),
            diagnostics: None,
        }
    }

    /// Sets the duration used for requests without one.
    #[must_use]
    pub fn with_default_duration(mut self, duration: DisplayDuration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Sets the diagnostics handle for logging warnings and errors.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Returns the surface.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Returns the surface mutably.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Shows a new notification.
    ///
    /// Requests with an empty message, and any request while no surface is
    /// available, are dropped without error. Warnings and errors are also
    /// logged to the diagnostics system.
    pub fn submit(&mut self, request: NotificationRequest) -> Option<NotificationId> {
        if !request.has_message() {
            return None;
        }
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("no notification surface; dropping {:?}", request.message());
            return None;
        };

        if let Some(handle) = &self.diagnostics {
            log_to_diagnostics(handle, &request);
        }

        let id = self.next_id;
        self.next_id = id.next();
        surface.mount(id, &request);
        let duration = request.duration_or(self.default_duration);
        self.live.push(Notification::new(id, request, duration));
        Some(id)
    }

    /// Makes every entering notification visible and starts its timer.
    pub fn frame(&mut self, now: Instant) {
        for notification in &mut self.live {
            notification.show(now);
        }
    }

    /// Starts the exit of every visible notification whose timer is due.
    pub fn tick(&mut self, now: Instant) {
        for notification in &mut self.live {
            if notification.expire(now) {
                if let Some(surface) = self.surface.as_mut() {
                    surface.begin_exit(notification.id());
                }
            }
        }
    }

    /// Pauses a visible notification while the pointer is over it.
    ///
    /// Returns `true` if the timer was cancelled.
    pub fn pointer_entered(&mut self, id: NotificationId) -> bool {
        self.find_mut(id).is_some_and(Notification::pause)
    }

    /// Resumes a paused notification with its grace window.
    ///
    /// Returns `true` if a new timer was started.
    pub fn pointer_left(&mut self, id: NotificationId, now: Instant) -> bool {
        self.find_mut(id)
            .is_some_and(|notification| notification.resume(now))
    }

    /// Starts the exit of a notification immediately.
    ///
    /// Returns `false` if the notification is already exiting or gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let Some(notification) = self.live.iter_mut().find(|n| n.id() == id) else {
            return false;
        };
        if !notification.begin_exit() {
            return false;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.begin_exit(id);
        }
        true
    }

    /// Removes a notification whose exit transition completed.
    ///
    /// Ignored unless the notification is exiting. Returns `true` if it was
    /// removed.
    pub fn exit_transition_ended(&mut self, id: NotificationId) -> bool {
        let Some(pos) = self.live.iter().position(|n| n.id() == id) else {
            return false;
        };
        if !self.live[pos].finish_exit() {
            return false;
        }
        self.live.remove(pos);
        if let Some(surface) = self.surface.as_mut() {
            surface.unmount(id);
        }
        true
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::PointerEntered(id) => {
                self.pointer_entered(*id);
            }
            Message::PointerLeft(id, now) => {
                self.pointer_left(*id, *now);
            }
            Message::Frame(now) => self.frame(*now),
            Message::Tick(now) => self.tick(*now),
            Message::ExitTransitionEnded(id) => {
                self.exit_transition_ended(*id);
            }
        }
    }

    /// Returns the live notifications, oldest first.
    pub fn live(&self) -> impl Iterator<Item = &Notification> {
        self.live.iter()
    }

    /// Returns a live notification by id.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.live.iter().find(|n| n.id() == id)
    }

    /// Returns the lifecycle state of a notification; `Removed` once gone.
    #[must_use]
    pub fn state(&self, id: NotificationId) -> NotificationState {
        self.get(id)
            .map_or(NotificationState::Removed, Notification::state)
    }

    /// Returns the number of live notifications.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Returns whether there are any live notifications.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.live.is_empty()
    }

    /// Returns whether some notification still waits for its first frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.live
            .iter()
            .any(|n| n.state() == NotificationState::Entering)
    }

    /// Returns the earliest running deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.live.iter().filter_map(Notification::deadline).min()
    }

    fn find_mut(&mut self, id: NotificationId) -> Option<&mut Notification> {
        self.live.iter_mut().find(|n| n.id() == id)
    }
}

impl<S: NotificationSurface> Notifier for Manager<S> {
    fn notify(&mut self, request: NotificationRequest) -> Option<NotificationId> {
        self.submit(request)
    }
}

fn log_to_diagnostics(handle: &DiagnosticsHandle, request: &NotificationRequest) {
    match request.severity() {
        Severity::Warn => {
            let warning_type = match request.cause() {
                Cause::InvalidInput => WarningType::InvalidInput,
                Cause::Network => WarningType::NetworkError,
                Cause::Configuration => WarningType::ConfigurationIssue,
                Cause::Authentication | Cause::Unspecified => WarningType::Other,
            };
            handle.log_warning(WarningEvent::new(warning_type, request.message()));
        }
        Severity::Error => {
            let error_type = match request.cause() {
                Cause::Authentication => ErrorType::AuthenticationFailed,
                Cause::Network => ErrorType::NetworkError,
                Cause::InvalidInput | Cause::Configuration | Cause::Unspecified => ErrorType::Other,
            };
            handle.log_error(ErrorEvent::new(error_type, request.message()));
        }
        Severity::Info | Severity::Success => {
            // Not logged as diagnostic events
        }
    }
}
