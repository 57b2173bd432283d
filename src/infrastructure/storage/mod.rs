// SPDX-License-Identifier: MPL-2.0
//! Persisted key/value stores.
//!
//! [`FileStore`] keeps the session in a CBOR map at `{data_dir}/storage.cbor`.
//! Every instance resolving the same data directory shares that file, and
//! learns about the others' writes by polling it:
//!
//! - the file's modification stamp (mtime and length) is checked on each poll;
//! - when it moved, the map is re-read and diffed against this instance's
//!   last snapshot;
//! - this instance's own writes update the snapshot, so they never come back
//!   as changes.
//!
//! Reads are served from the snapshot, which is refreshed by polls and writes.

mod memory;

pub use memory::MemoryStore;

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::app::paths;
use crate::application::port::{ChangeFeed, KeyValueStore, StorageChange};
use crate::error::StorageError;

/// Store file name within the app data directory.
const STORE_FILE: &str = "storage.cbor";

type Map = BTreeMap<String, String>;

/// What identifies one version of the store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl Stamp {
    fn of(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        Some(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

/// File-backed key/value store shared between instances.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    snapshot: Map,
    stamp: Option<Stamp>,
    /// Changes picked up while writing, reported on the next poll.
    pending: Vec<StorageChange>,
}

impl FileStore {
    /// Opens the store in `dir`, creating nothing until the first write.
    ///
    /// An unreadable or corrupted file is treated as empty.
    #[must_use]
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORE_FILE);
        let stamp = Stamp::of(&path);
        let snapshot = read_map(&path).unwrap_or_else(|err| {
            tracing::warn!("ignoring unreadable session store {}: {err}", path.display());
            Map::new()
        });
        Self {
            path,
            snapshot,
            stamp,
            pending: Vec::new(),
        }
    }

    /// Opens the store in the application data directory.
    ///
    /// Returns `None` when no data directory can be resolved.
    #[must_use]
    pub fn open_default() -> Option<Self> {
        paths::get_app_data_dir().map(|dir| Self::open(&dir))
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file and records the keys that differ from the snapshot.
    fn refresh(&mut self) {
        let stamp = Stamp::of(&self.path);
        if stamp == self.stamp {
            return;
        }
        let latest = read_map(&self.path).unwrap_or_else(|err| {
            tracing::debug!("session store unreadable while polling: {err}");
            Map::new()
        });
        self.pending.extend(diff(&self.snapshot, &latest));
        self.snapshot = latest;
        self.stamp = stamp;
    }

    fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        // Merge with whatever other instances wrote since our last look.
        self.refresh();
        let mut next = self.snapshot.clone();
        match value {
            Some(value) => next.insert(key.to_string(), value.to_string()),
            None => next.remove(key),
        };
        write_map(&self.path, &next)?;
        self.snapshot = next;
        self.stamp = Stamp::of(&self.path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.snapshot.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, Some(value))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.snapshot.contains_key(key) && Stamp::of(&self.path) == self.stamp {
            return Ok(());
        }
        self.write(key, None)
    }
}

impl ChangeFeed for FileStore {
    fn poll_changes(&mut self) -> Vec<StorageChange> {
        self.refresh();
        std::mem::take(&mut self.pending)
    }
}

/// The store used by the desktop host.
///
/// Falls back to an in-process store when no data directory exists; the
/// session then lasts as long as the process.
#[derive(Debug)]
pub enum SessionStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl SessionStore {
    /// Opens the file store in the data directory, or an in-memory one.
    #[must_use]
    pub fn open_default() -> Self {
        match FileStore::open_default() {
            Some(store) => {
                tracing::debug!("session store at {}", store.path().display());
                Self::File(store)
            }
            None => {
                tracing::warn!("no data directory; session will not be persisted");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::File(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}

impl ChangeFeed for SessionStore {
    fn poll_changes(&mut self) -> Vec<StorageChange> {
        match self {
            Self::File(store) => store.poll_changes(),
            Self::Memory(store) => store.poll_changes(),
        }
    }
}

/// Keys whose value differs between two snapshots, in key order.
fn diff(before: &Map, after: &Map) -> Vec<StorageChange> {
    let mut keys: Vec<&String> = before
        .iter()
        .filter(|(key, value)| after.get(*key) != Some(*value))
        .map(|(key, _)| key)
        .chain(after.keys().filter(|key| !before.contains_key(*key)))
        .collect();
    keys.sort();
    keys.into_iter().map(|key| StorageChange::new(key.clone())).collect()
}

fn read_map(path: &Path) -> Result<Map, StorageError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let file = fs::File::open(path)?;
    ciborium::from_reader(BufReader::new(file))
        .map_err(|err| StorageError::Corrupted(err.to_string()))
}

/// Writes `map` to a temporary sibling and renames it into place, so readers
/// never observe a half-written file.
fn write_map(path: &Path, map: &Map) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(format!("cbor.{}.tmp", std::process::id()));
    {
        let file = fs::File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        ciborium::into_writer(map, &mut writer)
            .map_err(|err| StorageError::Encode(err.to_string()))?;
        std::io::Write::flush(&mut writer)?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
