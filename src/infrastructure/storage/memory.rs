// SPDX-License-Identifier: MPL-2.0
//! In-process key/value store.
//!
//! Used when no data directory can be resolved, and by tests. [`MemoryStore::fork`]
//! opens another context over the same data, which is how two instances
//! sharing one store are simulated.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::port::{ChangeFeed, KeyValueStore, StorageChange};
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Entry {
    value: Option<String>,
    /// Clock value of the last write.
    version: u64,
    /// Context that made the last write.
    writer: u64,
}

#[derive(Debug, Default)]
struct Shared {
    entries: BTreeMap<String, Entry>,
    clock: u64,
    next_context: u64,
}

/// Key/value store held in memory and shared between forked contexts.
#[derive(Debug)]
pub struct MemoryStore {
    shared: Arc<Mutex<Shared>>,
    context: u64,
    /// Clock value up to which changes were reported.
    seen: u64,
}

impl MemoryStore {
    /// Creates an empty store with a single context.
    #[must_use]
    pub fn new() -> Self {
        let shared = Shared {
            next_context: 1,
            ..Shared::default()
        };
        Self {
            shared: Arc::new(Mutex::new(shared)),
            context: 0,
            seen: 0,
        }
    }

    /// Opens another context over the same data.
    ///
    /// Writes made through one context are reported by the other's
    /// [`ChangeFeed::poll_changes`].
    #[must_use]
    pub fn fork(&self) -> Self {
        let mut shared = self.lock();
        let context = shared.next_context;
        shared.next_context += 1;
        Self {
            shared: Arc::clone(&self.shared),
            context,
            seen: shared.clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // Entries stay consistent even if a holder panicked mid-test.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&mut self, key: &str, value: Option<&str>) {
        let context = self.context;
        let mut shared = self.lock();
        shared.clock += 1;
        let version = shared.clock;
        let entry = shared.entries.entry(key.to_string()).or_default();
        entry.value = value.map(str::to_string);
        entry.version = version;
        entry.writer = context;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock()
            .entries
            .get(key)
            .and_then(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, Some(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.write(key, None);
        Ok(())
    }
}

impl ChangeFeed for MemoryStore {
    fn poll_changes(&mut self) -> Vec<StorageChange> {
        let (changes, clock) = {
            let shared = self.lock();
            let changes = shared
                .entries
                .iter()
                .filter(|(_, entry)| entry.version > self.seen && entry.writer != self.context)
                .map(|(key, _)| StorageChange::new(key.clone()))
                .collect();
            (changes, shared.clock)
        };
        self.seen = clock;
        changes
    }
}
