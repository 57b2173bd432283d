// SPDX-License-Identifier: MPL-2.0
//! Cached `{sub, name}` profile stored next to the token.
//!
//! The cache holds a single entry. It is only trusted when its subject is
//! exactly the subject of the current token; anything unreadable is a miss.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::token::subject_from_value;
use crate::domain::session::{Subject, UserProfile};

#[derive(Debug, Serialize, Deserialize)]
struct CachedProfile {
    sub: Value,
    name: Option<String>,
}

/// Returns the cached profile for `subject`, if the stored entry matches.
#[must_use]
pub fn read_cached(raw: Option<&str>, subject: &Subject) -> Option<UserProfile> {
    let cached: CachedProfile = serde_json::from_str(raw?).ok()?;
    if subject_from_value(&cached.sub).as_ref() != Some(subject) {
        return None;
    }
    UserProfile::new(cached.name?)
}

/// Encodes a cache entry for `subject`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode_cached(subject: &Subject, profile: &UserProfile) -> serde_json::Result<String> {
    serde_json::to_string(&CachedProfile {
        sub: Value::String(subject.as_str().to_string()),
        name: Some(profile.name.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(raw: &str) -> Subject {
        Subject::new(raw).expect("non-empty subject")
    }

    #[test]
    fn matching_entry_is_a_hit() {
        let raw = r#"{"sub":"42","name":"Ada Lovelace"}"#;
        let profile = read_cached(Some(raw), &subject("42")).expect("cache hit");
        assert_eq!(profile.name, "Ada Lovelace");
    }

    #[test]
    fn numeric_sub_matches_textual_subject() {
        let raw = r#"{"sub":42,"name":"Ada"}"#;
        assert!(read_cached(Some(raw), &subject("42")).is_some());
    }

    #[test]
    fn other_subject_is_a_miss() {
        let raw = r#"{"sub":"42","name":"Ada"}"#;
        assert!(read_cached(Some(raw), &subject("420")).is_none());
    }

    #[test]
    fn corrupt_or_nameless_entries_are_misses() {
        assert!(read_cached(None, &subject("1")).is_none());
        assert!(read_cached(Some("{not json"), &subject("1")).is_none());
        assert!(read_cached(Some(r#"{"sub":"1"}"#), &subject("1")).is_none());
        assert!(read_cached(Some(r#"{"sub":"1","name":""}"#), &subject("1")).is_none());
    }

    #[test]
    fn encoded_entry_reads_back() {
        let profile = UserProfile::new("Grace Hopper").expect("valid name");
        let raw = encode_cached(&subject("9"), &profile).expect("encodes");
        assert_eq!(read_cached(Some(&raw), &subject("9")), Some(profile));
    }
}
