// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: Credential service and profile lookup over HTTP
//!   (implements [`CredentialService`] and [`ProfileLookup`])
//! - [`storage`]: File-backed and in-memory session stores
//!   (implement [`KeyValueStore`] and [`ChangeFeed`])
//!
//! [`CredentialService`]: crate::application::port::CredentialService
//! [`ProfileLookup`]: crate::application::port::ProfileLookup
//! [`KeyValueStore`]: crate::application::port::KeyValueStore
//! [`ChangeFeed`]: crate::application::port::ChangeFeed

pub mod http;
pub mod storage;

// Re-export main types for convenience
pub use http::HttpSessionClient;
pub use storage::{FileStore, MemoryStore, SessionStore};
