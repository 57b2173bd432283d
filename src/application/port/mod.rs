// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters and
//! the iced host implement. The notification manager, the panel controller
//! and the session glue only ever talk to these traits.
//!
//! # Available Ports
//!
//! - [`session`]: Credential service and profile lookup
//! - [`storage`]: Persisted key/value store and its cross-instance change feed
//! - [`surface`]: Where notifications are mounted, and who accepts them
//! - [`panel`]: Markup hosting the account panel and its status indicator
//!
//! # Design Notes
//!
//! - Traits use domain types only (no iced widgets, no reqwest types)
//! - Network ports return `Send` futures so callers can hand them to
//!   `iced::Task::perform`
//! - Everything else is synchronous and runs on the update loop
//!
//! # Example
//!
//! ```ignore
//! use authbar::application::port::{KeyValueStore, StorageChange};
//!
//! fn is_signed_in(store: &impl KeyValueStore) -> bool {
//!     store.get("authToken").is_some()
//! }
//! ```

pub mod panel;
pub mod session;
pub mod storage;
pub mod surface;

// Re-export main types for convenience
pub use panel::{ElementId, FocusCandidate, PanelHost, StatusDisplay, StatusView};
pub use session::{CredentialService, ProfileLookup, SessionError};
pub use storage::{ChangeFeed, KeyValueStore, StorageChange};
pub use surface::{NotificationSurface, Notifier};
