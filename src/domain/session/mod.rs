// SPDX-License-Identifier: MPL-2.0
//! Session value objects.
//!
//! - [`AccessToken`]: Opaque bearer token returned by a successful login
//! - [`Subject`]: Identifier of the user a token was issued for
//! - [`UserProfile`]: Display data looked up for a subject
//! - [`AuthSnapshot`]: What the status indicator renders from

use std::fmt;

/// Bearer token issued by the credential service.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token. Returns `None` for blank input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Identifier of the user a token was issued for (the JWT `sub` claim).
///
/// Comparison is exact: cached profile data is only trusted for the very
/// same subject string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    /// Wraps a subject identifier. Returns `None` for blank input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display data for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Human-readable name.
    pub name: String,
}

impl UserProfile {
    /// Creates a profile. Returns `None` when the name is blank.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self { name })
        }
    }

    /// Returns the avatar initials for this profile.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Builds avatar initials: the first letter of up to two words, upper-cased.
///
/// Falls back to `"U"` for names without any letters.
#[must_use]
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "U".to_string()
    } else {
        letters
    }
}

/// Authentication state as seen by the status indicator.
///
/// `display_name` is the last-known profile name; it is forgotten whenever
/// the token changes and comes back once the profile is looked up again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Whether a token is currently stored.
    pub is_authenticated: bool,
    /// Display name of the signed-in user, if known.
    pub display_name: Option<String>,
}

impl AuthSnapshot {
    /// Snapshot of a signed-out session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Snapshot of a signed-in session.
    #[must_use]
    pub fn signed_in(display_name: Option<String>) -> Self {
        Self {
            is_authenticated: true,
            display_name,
        }
    }
}
