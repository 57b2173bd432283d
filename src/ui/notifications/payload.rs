// SPDX-License-Identifier: MPL-2.0
//! Building notification requests from loosely-typed JSON payloads.
//!
//! Payloads come from outside the typed API (the `--toast` start-up flag,
//! for instance), so parsing is forgiving:
//!
//! - a string is the message;
//! - an object supplies `message`, `type` and `duration`, each optional;
//! - anything else is not a notification.

use serde_json::Value;

use crate::config::PayloadFallback;
use crate::domain::notification::{NotificationRequest, Severity};
use crate::domain::ui::DisplayDuration;

impl NotificationRequest {
    /// Builds a request from a JSON payload.
    ///
    /// For objects, a `message` that is a non-empty string, a non-zero number
    /// or `true` is used as text. Without one (`0`, `false` and `""` count as
    /// missing), `fallback` decides: the compact JSON of the whole payload is
    /// shown with its keys in their original order, or the payload is dropped.
    /// `type` falls back to info and a non-numeric `duration` to the
    /// manager's default.
    ///
    /// ```
    /// use authbar::config::PayloadFallback;
    /// use authbar::domain::notification::{NotificationRequest, Severity};
    /// use serde_json::json;
    ///
    /// let request = NotificationRequest::from_payload(
    ///     &json!({"message": "Saved", "type": "success", "duration": 1000}),
    ///     PayloadFallback::Serialize,
    /// )
    /// .unwrap();
    /// assert_eq!(request.message(), "Saved");
    /// assert_eq!(request.severity(), Severity::Success);
    ///
    /// assert!(NotificationRequest::from_payload(&json!(null), PayloadFallback::Serialize).is_none());
    /// ```
    #[must_use]
    pub fn from_payload(payload: &Value, fallback: PayloadFallback) -> Option<Self> {
        match payload {
            Value::String(message) => Some(Self::new(message.clone())),
            Value::Object(fields) => {
                let message = match fields.get("message").and_then(message_text) {
                    Some(message) => message,
                    None => match fallback {
                        PayloadFallback::Serialize => payload.to_string(),
                        PayloadFallback::Drop => return None,
                    },
                };
                let severity = fields
                    .get("type")
                    .and_then(Value::as_str)
                    .map(Severity::parse)
                    .unwrap_or_default();
                let mut request = Self::new(message).with_severity(severity);
                if let Some(duration) = fields.get("duration").and_then(duration_from) {
                    request = request.with_duration(duration);
                }
                Some(request)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => None,
        }
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)] // Saturating float-to-int casts are intended
fn duration_from(value: &Value) -> Option<DisplayDuration> {
    let millis = value.as_f64()?;
    if !millis.is_finite() {
        return None;
    }
    Some(DisplayDuration::from_signed_millis(millis as i64))
}

/// Parses the initial-toast string supplied at start-up.
///
/// Empty input and the literal `null` mean "no toast". Malformed JSON is
/// logged and ignored.
#[must_use]
pub fn parse_initial_payload(raw: &str, fallback: PayloadFallback) -> Option<NotificationRequest> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "null" {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(payload) => NotificationRequest::from_payload(&payload, fallback),
        Err(err) => {
            tracing::warn!("Failed to parse toast payload: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(payload: &Value) -> Option<NotificationRequest> {
        NotificationRequest::from_payload(payload, PayloadFallback::Serialize)
    }

    #[test]
    fn string_payload_is_an_info_message() {
        let request = parse(&json!("Welcome back")).unwrap();
        assert_eq!(request.message(), "Welcome back");
        assert_eq!(request.severity(), Severity::Info);
        assert_eq!(request.duration(), None);
    }

    #[test]
    fn object_fields_are_read() {
        let request = parse(&json!({"message": "Saved", "type": "warn", "duration": 1500})).unwrap();
        assert_eq!(request.message(), "Saved");
        assert_eq!(request.severity(), Severity::Warn);
        assert_eq!(request.duration(), Some(DisplayDuration::from_millis(1500)));
    }

    #[test]
    fn unknown_type_falls_back_to_info() {
        let request = parse(&json!({"message": "x", "type": "shout"})).unwrap();
        assert_eq!(request.severity(), Severity::Info);
        let request = parse(&json!({"message": "x", "type": 3})).unwrap();
        assert_eq!(request.severity(), Severity::Info);
    }

    #[test]
    fn scalar_messages_are_coerced_to_text() {
        assert_eq!(parse(&json!({"message": 42})).unwrap().message(), "42");
        assert_eq!(parse(&json!({"message": true})).unwrap().message(), "true");
    }

    #[test]
    fn falsy_scalar_messages_count_as_missing() {
        assert_eq!(
            parse(&json!({"message": 0})).unwrap().message(),
            r#"{"message":0}"#
        );
        assert_eq!(
            parse(&json!({"message": false, "type": "warn"})).unwrap().message(),
            r#"{"message":false,"type":"warn"}"#
        );
        let drop = PayloadFallback::Drop;
        assert!(NotificationRequest::from_payload(&json!({"message": 0}), drop).is_none());
    }

    #[test]
    fn serialized_fallback_keeps_key_order() {
        let request =
            parse_initial_payload(r#"{"type":"error","code":7,"at":"login"}"#, PayloadFallback::Serialize)
                .unwrap();
        assert_eq!(request.message(), r#"{"type":"error","code":7,"at":"login"}"#);
    }

    #[test]
    fn missing_message_serializes_payload_by_default() {
        let request = parse(&json!({"type": "error", "code": 7})).unwrap();
        assert_eq!(request.message(), r#"{"type":"error","code":7}"#);
        assert_eq!(request.severity(), Severity::Error);
    }

    #[test]
    fn missing_message_is_dropped_when_configured() {
        let payload = json!({"message": "", "type": "error"});
        assert!(NotificationRequest::from_payload(&payload, PayloadFallback::Drop).is_none());
    }

    #[test]
    fn non_numeric_or_negative_durations() {
        let request = parse(&json!({"message": "x", "duration": "soon"})).unwrap();
        assert_eq!(request.duration(), None);
        let request = parse(&json!({"message": "x", "duration": -50})).unwrap();
        assert_eq!(request.duration(), Some(DisplayDuration::from_millis(0)));
    }

    #[test]
    fn other_payload_shapes_are_rejected() {
        assert!(parse(&json!(null)).is_none());
        assert!(parse(&json!(12)).is_none());
        assert!(parse(&json!(false)).is_none());
        assert!(parse(&json!(["a"])).is_none());
    }

    #[test]
    fn initial_payload_handles_null_empty_and_garbage() {
        let fallback = PayloadFallback::Serialize;
        assert!(parse_initial_payload("", fallback).is_none());
        assert!(parse_initial_payload("null", fallback).is_none());
        assert!(parse_initial_payload("{oops", fallback).is_none());
        let request = parse_initial_payload(r#"{"message":"Hi"}"#, fallback).unwrap();
        assert_eq!(request.message(), "Hi");
    }
}
