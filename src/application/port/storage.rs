// SPDX-License-Identifier: MPL-2.0
//! Persisted key/value store port definitions.
//!
//! The store holds the session token, the cached profile and the acting
//! user id. Several running instances may share one store; each of them
//! learns about the others' writes through [`ChangeFeed`].

use crate::error::StorageError;

/// String key/value store.
///
/// Reads never fail: unreadable data is reported as absent.
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium could not be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// A key changed by another instance sharing the same store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    /// The key whose value was set, replaced or removed.
    pub key: String,
}

impl StorageChange {
    /// Creates a change notice for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Source of changes made by other instances.
///
/// Delivery is lossy: two writes between polls may surface as one change,
/// and a write followed by its revert may surface as none. Consumers treat
/// a change as "invalidate and recheck".
pub trait ChangeFeed {
    /// Returns keys changed elsewhere since the previous poll.
    ///
    /// Writes made through this same instance are never reported.
    fn poll_changes(&mut self) -> Vec<StorageChange>;
}
