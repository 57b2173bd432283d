// SPDX-License-Identifier: MPL-2.0
//! Notification value objects.
//!
//! - [`NotificationId`]: Handle of one live notification instance
//! - [`Severity`]: Visual and diagnostic category of a notification
//! - [`Cause`]: What a warning or error notification is about
//! - [`NotificationRequest`]: What to show, how urgently and for how long

use std::fmt;

use crate::domain::ui::DisplayDuration;

/// Identifier of a notification instance.
///
/// Ids are allocated by the notification manager in increasing order and
/// are never reused within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Something went partly wrong; the user can carry on.
    Warn,
    /// An operation failed.
    Error,
    /// An operation completed.
    Success,
}

impl Severity {
    /// Parses a severity name, case-insensitively.
    ///
    /// Unknown names fall back to [`Severity::Info`].
    ///
    /// ```
    /// use authbar::domain::notification::Severity;
    ///
    /// assert_eq!(Severity::parse("WARNING"), Severity::Warn);
    /// assert_eq!(Severity::parse("critical"), Severity::Info);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            "success" => Self::Success,
            _ => Self::Info,
        }
    }

    /// Returns the canonical lower-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// What a warning or error notification reports on.
///
/// Used to categorize the diagnostics entry recorded alongside the toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cause {
    /// Incomplete or invalid form input.
    InvalidInput,
    /// The credential service refused the request.
    Authentication,
    /// A remote service could not be reached or answered badly.
    Network,
    /// Settings could not be read.
    Configuration,
    /// Not categorized.
    #[default]
    Unspecified,
}

/// A request to show a notification.
///
/// Requests are immutable once built; the manager copies them into the
/// instance it creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    message: String,
    severity: Severity,
    duration: Option<DisplayDuration>,
    cause: Cause,
}

impl NotificationRequest {
    /// Creates an info request.
    ///
    /// Without [`with_duration`](Self::with_duration) the manager's default
    /// duration applies.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            duration: None,
            cause: Cause::Unspecified,
        }
    }

    /// Creates an info request.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message)
    }

    /// Creates a warning request.
    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Warn)
    }

    /// Creates an error request.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Error)
    }

    /// Creates a success request.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Success)
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: DisplayDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets what the notification reports on.
    #[must_use]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = cause;
        self
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the requested display duration, if one was given.
    #[must_use]
    pub fn duration(&self) -> Option<DisplayDuration> {
        self.duration
    }

    /// Returns the display duration, falling back to `default`.
    #[must_use]
    pub fn duration_or(&self, default: DisplayDuration) -> DisplayDuration {
        self.duration.unwrap_or(default)
    }

    /// Returns what the notification reports on.
    #[must_use]
    pub fn cause(&self) -> Cause {
        self.cause
    }

    /// Returns whether this request can be shown at all.
    #[must_use]
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parse_accepts_known_names() {
        assert_eq!(Severity::parse("info"), Severity::Info);
        assert_eq!(Severity::parse("warn"), Severity::Warn);
        assert_eq!(Severity::parse("Warning"), Severity::Warn);
        assert_eq!(Severity::parse("ERROR"), Severity::Error);
        assert_eq!(Severity::parse(" success "), Severity::Success);
    }

    #[test]
    fn severity_parse_falls_back_to_info() {
        assert_eq!(Severity::parse(""), Severity::Info);
        assert_eq!(Severity::parse("fatal"), Severity::Info);
    }

    #[test]
    fn request_defaults_to_info_and_four_seconds() {
        let request = NotificationRequest::new("Saved");
        assert_eq!(request.severity(), Severity::Info);
        assert_eq!(request.duration(), None);
        assert_eq!(request.duration_or(DisplayDuration::default()).as_millis(), 4000);
        assert_eq!(request.cause(), Cause::Unspecified);
        assert!(request.has_message());
    }

    #[test]
    fn explicit_duration_wins_over_default() {
        let request =
            NotificationRequest::success("Saved").with_duration(DisplayDuration::from_millis(1000));
        assert_eq!(request.duration_or(DisplayDuration::default()).as_millis(), 1000);
    }

    #[test]
    fn empty_message_is_not_showable() {
        assert!(!NotificationRequest::error("").has_message());
    }

    #[test]
    fn ids_increase() {
        let first = NotificationId::new(7);
        assert!(first.next() > first);
        assert_eq!(first.next().value(), 8);
        assert_eq!(first.to_string(), "toast-7");
    }
}
