// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error type definitions.
//!
//! This module provides:
//! - Type enums for categorizing warnings and errors
//! - Message sanitization to remove credentials before they reach the log

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Warning and Error Type Enums
// =============================================================================

/// Categories of warnings that can occur in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// The user submitted an incomplete form.
    InvalidInput,
    /// A network-related issue occurred.
    NetworkError,
    /// A configuration issue was detected.
    ConfigurationIssue,
    /// Other warning type not covered by specific categories.
    Other,
}

/// Categories of errors that can occur in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The credential service refused the login.
    AuthenticationFailed,
    /// The credential service could not be reached.
    NetworkError,
    /// Other error type not covered by specific categories.
    Other,
}

// =============================================================================
// Message Sanitization
// =============================================================================

/// `Bearer <token>` fragments, as found in echoed headers.
static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-_.~+/]+=*").expect("bearer regex should compile")
});

/// Three dot-separated base64url segments: the shape of a JWT.
static JWT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}")
        .expect("jwt regex should compile")
});

/// Sanitizes a message by removing credentials.
///
/// Bearer headers become `Bearer <token>` and bare JWT-shaped strings become
/// `<token>`, preserving the rest of the message.
///
/// # Examples
///
/// ```
/// use authbar::diagnostics::sanitize_message;
///
/// let msg = "request failed with Authorization: Bearer abc.def.ghi";
/// assert_eq!(sanitize_message(msg), "request failed with Authorization: Bearer <token>");
///
/// let msg = "Login failed: bad credentials";
/// assert_eq!(sanitize_message(msg), "Login failed: bad credentials");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let without_bearer = BEARER_PATTERN.replace_all(message, "Bearer <token>");
    JWT_PATTERN
        .replace_all(&without_bearer, "<token>")
        .into_owned()
}
