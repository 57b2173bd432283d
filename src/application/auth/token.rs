// SPDX-License-Identifier: MPL-2.0
//! Reading the subject claim out of an access token.
//!
//! Tokens are JWTs; only the payload segment is decoded, the signature is
//! the service's business. Anything unreadable is treated as "no subject".

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;

use crate::domain::session::Subject;

/// Returns the `sub` claim of a JWT, or `None` when the token is malformed.
///
/// Numeric subjects are accepted and rendered as decimal text, so a token
/// issued with `"sub": 42` matches a cached profile stored with `"42"`.
///
/// ```
/// use authbar::application::auth::token_subject;
///
/// // {"sub":"42"}
/// let token = "eyJhbGciOiJub25lIn0.eyJzdWIiOiI0MiJ9.c2ln";
/// assert_eq!(token_subject(token).unwrap().as_str(), "42");
/// assert!(token_subject("not-a-jwt").is_none());
/// ```
#[must_use]
pub fn token_subject(token: &str) -> Option<Subject> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    subject_from_value(claims.get("sub")?)
}

/// Normalizes a JSON subject value to text.
pub(crate) fn subject_from_value(value: &Value) -> Option<Subject> {
    match value {
        Value::String(s) => Subject::new(s.clone()),
        Value::Number(n) => Subject::new(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.signature",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn string_subject_is_extracted() {
        let token = jwt(r#"{"sub":"user-7","exp":1}"#);
        assert_eq!(token_subject(&token), Subject::new("user-7"));
    }

    #[test]
    fn numeric_subject_becomes_text() {
        let token = jwt(r#"{"sub":42}"#);
        assert_eq!(token_subject(&token), Subject::new("42"));
    }

    #[test]
    fn padded_payload_is_accepted() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"a"}"#);
        let token = format!("h.{payload}==.s");
        assert_eq!(token_subject(&token), Subject::new("a"));
    }

    #[test]
    fn missing_or_empty_subject_is_none() {
        assert!(token_subject(&jwt(r#"{"name":"x"}"#)).is_none());
        assert!(token_subject(&jwt(r#"{"sub":""}"#)).is_none());
        assert!(token_subject(&jwt(r#"{"sub":null}"#)).is_none());
    }

    #[test]
    fn malformed_tokens_are_none() {
        assert!(token_subject("").is_none());
        assert!(token_subject("onlyone").is_none());
        assert!(token_subject("a.!!!.c").is_none());
        assert!(token_subject(&jwt("not json")).is_none());
    }
}
