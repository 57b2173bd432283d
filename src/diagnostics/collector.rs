// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The collector receives events from handles spread across the application
//! and keeps the most recent ones in a bounded log.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::{
    sanitize_message, AppStateEvent, BufferCapacity, DiagnosticEvent, DiagnosticEventKind,
    DiagnosticReport, ErrorEvent, ReportMetadata, SerializableEvent, UserAction, WarningEvent,
};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel to avoid blocking the UI thread.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a user action event.
    ///
    /// This method is non-blocking and will drop the event if the
    /// internal channel is full (backpressure protection).
    pub fn log_action(&self, action: UserAction) {
        self.send(DiagnosticEventKind::UserAction { action });
    }

    /// Logs a warning event.
    ///
    /// The message is sanitized to remove credentials.
    pub fn log_warning(&self, warning_event: WarningEvent) {
        let event = WarningEvent {
            message: sanitize_message(&warning_event.message),
            ..warning_event
        };
        self.send(DiagnosticEventKind::Warning { event });
    }

    /// Logs an error event.
    ///
    /// The message is sanitized to remove credentials.
    pub fn log_error(&self, error_event: ErrorEvent) {
        let event = ErrorEvent {
            message: sanitize_message(&error_event.message),
            ..error_event
        };
        self.send(DiagnosticEventKind::Error { event });
    }

    /// Logs an application state change event.
    pub fn log_state(&self, state: AppStateEvent) {
        self.send(DiagnosticEventKind::AppState { state });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
///
/// Old events are evicted once the log reaches its capacity.
pub struct DiagnosticsCollector {
    events: VecDeque<DiagnosticEvent>,
    capacity: BufferCapacity,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for offsets).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

/// Channel capacity for event buffering between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified log capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            events: VecDeque::with_capacity(capacity.value()),
            capacity,
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the log.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.push(event);
        }
    }

    /// Logs an action directly to the log (bypassing the channel).
    pub fn log_action(&mut self, action: UserAction) {
        self.push(DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action,
        }));
    }

    /// Logs a state change directly to the log (bypassing the channel).
    pub fn log_state(&mut self, state: AppStateEvent) {
        self.push(DiagnosticEvent::new(DiagnosticEventKind::AppState { state }));
    }

    fn push(&mut self, event: DiagnosticEvent) {
        if self.events.len() == self.capacity.value() {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Returns the number of events currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    /// Clears all stored events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the log capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }

    /// Returns how long the collector has been running.
    #[must_use]
    pub fn collection_duration(&self) -> Duration {
        self.collection_started_at.elapsed()
    }

    /// Exports all collected events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Builds a diagnostic report from the current log contents.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .events
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CloseReason, ErrorType, WarningType};

    #[test]
    fn handle_events_arrive_after_process_pending() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();

        handle.log_action(UserAction::OpenPanel);
        handle.log_action(UserAction::ClosePanel {
            reason: CloseReason::Escape,
        });
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn oldest_events_are_evicted_at_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(50));
        for _ in 0..50 {
            collector.log_action(UserAction::Login);
        }
        collector.log_action(UserAction::Logout);

        assert_eq!(collector.len(), 50);
        let last = collector.iter().last().expect("log should not be empty");
        assert_eq!(
            last.kind,
            DiagnosticEventKind::UserAction {
                action: UserAction::Logout
            }
        );
    }

    #[test]
    fn warning_messages_are_sanitized() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        collector.handle().log_warning(WarningEvent::new(
            WarningType::NetworkError,
            "profile lookup with Bearer secret-token failed",
        ));
        collector.process_pending();

        let event = collector.iter().next().expect("warning should be stored");
        match &event.kind {
            DiagnosticEventKind::Warning { event } => {
                assert_eq!(event.message, "profile lookup with Bearer <token> failed");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn export_json_contains_events_and_metadata() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        collector.log_state(AppStateEvent::Started);
        collector.handle().log_error(ErrorEvent::new(
            ErrorType::AuthenticationFailed,
            "Login failed: bad credentials",
        ));
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["metadata"]["event_count"], 2);
        assert_eq!(value["events"][0]["type"], "app_state");
        assert_eq!(value["events"][1]["event"]["error_type"], "authentication_failed");
    }

    #[test]
    fn handle_drops_events_while_channel_is_full() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();
        for _ in 0..DEFAULT_CHANNEL_CAPACITY + 10 {
            handle.log_action(UserAction::DismissNotification);
        }

        collector.process_pending();
        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        collector.log_action(UserAction::SetActingUser);
        collector.clear();
        assert!(collector.is_empty());
        assert_eq!(collector.capacity(), 500);
    }
}
