// SPDX-License-Identifier: MPL-2.0
//! Live notification instances.
//!
//! An instance moves strictly forward through its lifecycle, except for the
//! hover cycle which may repeat without bound:
//!
//! ```text
//! Entering -> Visible -> [PausedForHover <-> Visible]* -> Exiting -> Removed
//! ```
//!
//! Every transition that competes with the dismiss timer takes the timer
//! out first, so a stale deadline can never fire after the state moved on.

use std::time::{Duration, Instant};

use crate::domain::notification::{NotificationId, NotificationRequest, Severity};
use crate::domain::ui::DisplayDuration;

/// Lifecycle state of a notification instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    /// Mounted, waiting for the next frame to become visible.
    Entering,
    /// Shown with a running dismiss timer.
    Visible,
    /// The pointer is over the instance; no timer runs.
    PausedForHover,
    /// The exit transition is playing.
    Exiting,
    /// The exit transition completed and the instance was detached.
    Removed,
}

/// Dismiss deadline owned by exactly one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTimer {
    /// `None` when `now + length` is past what `Instant` can hold; such a
    /// timer never fires.
    deadline: Option<Instant>,
}

impl DismissTimer {
    fn starting_at(now: Instant, length: Duration) -> Self {
        Self {
            deadline: now.checked_add(length),
        }
    }

    /// Returns when the timer fires.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

/// A notification currently held by the manager.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    request: NotificationRequest,
    duration: DisplayDuration,
    timer: Option<DismissTimer>,
    state: NotificationState,
}

impl Notification {
    pub(super) fn new(
        id: NotificationId,
        request: NotificationRequest,
        duration: DisplayDuration,
    ) -> Self {
        Self {
            id,
            request,
            duration,
            timer: None,
            state: NotificationState::Entering,
        }
    }

    /// Returns the instance id.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the request this instance was created from.
    #[must_use]
    pub fn request(&self) -> &NotificationRequest {
        &self.request
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        self.request.message()
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.request.severity()
    }

    /// Returns the resolved display duration.
    #[must_use]
    pub fn duration(&self) -> DisplayDuration {
        self.duration
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> NotificationState {
        self.state
    }

    /// Returns when the dismiss timer fires, if one is running.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.and_then(|timer| timer.deadline())
    }

    /// `Entering -> Visible`, starting a timer of the full duration.
    pub(super) fn show(&mut self, now: Instant) -> bool {
        if self.state != NotificationState::Entering {
            return false;
        }
        self.timer = Some(DismissTimer::starting_at(now, self.duration.as_duration()));
        self.state = NotificationState::Visible;
        true
    }

    /// `Visible -> Exiting` once the timer is due.
    pub(super) fn expire(&mut self, now: Instant) -> bool {
        if self.state != NotificationState::Visible {
            return false;
        }
        match self.timer.take() {
            Some(timer) if timer.is_due(now) => {
                self.state = NotificationState::Exiting;
                true
            }
            other => {
                self.timer = other;
                false
            }
        }
    }

    /// `Visible -> PausedForHover`, cancelling the timer.
    pub(super) fn pause(&mut self) -> bool {
        if self.state != NotificationState::Visible {
            return false;
        }
        self.timer = None;
        self.state = NotificationState::PausedForHover;
        true
    }

    /// `PausedForHover -> Visible`, starting a grace timer.
    pub(super) fn resume(&mut self, now: Instant) -> bool {
        if self.state != NotificationState::PausedForHover {
            return false;
        }
        self.timer = Some(DismissTimer::starting_at(now, self.duration.resume_grace()));
        self.state = NotificationState::Visible;
        true
    }

    /// Any non-terminal state `-> Exiting`, cancelling the timer first.
    pub(super) fn begin_exit(&mut self) -> bool {
        match self.state {
            NotificationState::Entering
            | NotificationState::Visible
            | NotificationState::PausedForHover => {
                self.timer = None;
                self.state = NotificationState::Exiting;
                true
            }
            NotificationState::Exiting | NotificationState::Removed => false,
        }
    }

    /// `Exiting -> Removed`.
    pub(super) fn finish_exit(&mut self) -> bool {
        if self.state != NotificationState::Exiting {
            return false;
        }
        self.state = NotificationState::Removed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(millis: u64) -> Notification {
        Notification::new(
            NotificationId::new(1),
            NotificationRequest::new("Saved"),
            DisplayDuration::from_millis(millis),
        )
    }

    #[test]
    fn new_instance_is_entering_without_timer() {
        let n = instance(1000);
        assert_eq!(n.state(), NotificationState::Entering);
        assert_eq!(n.deadline(), None);
    }

    #[test]
    fn show_starts_full_duration_timer() {
        let t0 = Instant::now();
        let mut n = instance(1000);
        assert!(n.show(t0));
        assert_eq!(n.deadline(), Some(t0 + Duration::from_millis(1000)));
        assert!(!n.show(t0), "show only applies to entering instances");
    }

    #[test]
    fn expire_waits_for_deadline() {
        let t0 = Instant::now();
        let mut n = instance(1000);
        n.show(t0);
        assert!(!n.expire(t0 + Duration::from_millis(999)));
        assert_eq!(n.state(), NotificationState::Visible);
        assert!(n.deadline().is_some());
        assert!(n.expire(t0 + Duration::from_millis(1000)));
        assert_eq!(n.state(), NotificationState::Exiting);
        assert_eq!(n.deadline(), None);
    }

    #[test]
    fn pause_clears_timer_and_resume_uses_grace() {
        let t0 = Instant::now();
        let mut n = instance(1000);
        n.show(t0);
        assert!(n.pause());
        assert_eq!(n.deadline(), None);
        assert!(!n.pause(), "pausing twice cancels nothing");

        let t1 = t0 + Duration::from_millis(900);
        assert!(n.resume(t1));
        assert_eq!(n.deadline(), Some(t1 + Duration::from_millis(800)));
    }

    #[test]
    fn long_duration_is_not_shortened() {
        let t0 = Instant::now();
        let mut n = instance(20 * 60 * 1000);
        n.show(t0);
        assert!(!n.expire(t0 + Duration::from_secs(10 * 60) + Duration::from_millis(1)));
        assert_eq!(n.state(), NotificationState::Visible);
        assert!(n.expire(t0 + Duration::from_secs(20 * 60)));
    }

    #[test]
    fn unrepresentable_deadline_never_fires() {
        let t0 = Instant::now();
        let mut n = instance(u64::MAX);
        n.show(t0);
        assert_eq!(n.deadline(), None);
        assert!(!n.expire(t0 + Duration::from_secs(365 * 24 * 3600)));
        assert_eq!(n.state(), NotificationState::Visible);
        assert!(n.begin_exit(), "manual dismiss still works");
    }

    #[test]
    fn zero_duration_expires_on_first_check() {
        let t0 = Instant::now();
        let mut n = instance(0);
        n.show(t0);
        assert!(n.expire(t0));
    }

    #[test]
    fn begin_exit_is_idempotent() {
        let mut n = instance(1000);
        assert!(n.begin_exit());
        assert!(!n.begin_exit());
        assert!(n.finish_exit());
        assert!(!n.begin_exit());
        assert_eq!(n.state(), NotificationState::Removed);
    }

    #[test]
    fn finish_exit_requires_exiting() {
        let mut n = instance(1000);
        n.show(Instant::now());
        assert!(!n.finish_exit());
        assert_eq!(n.state(), NotificationState::Visible);
    }
}
