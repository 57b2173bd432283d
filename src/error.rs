// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of the persisted key/value store backing the session.
///
/// Callers in the session layer log these and carry on: a store that cannot
/// be written behaves like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(String),

    /// The backing file exists but is not a valid CBOR map.
    #[error("storage file is corrupted: {0}")]
    Corrupted(String),

    /// The encoded map could not be produced.
    #[error("storage encoding failed: {0}")]
    Encode(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
