// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to report the outcome of an action
//! (login, logout, failed profile lookup) without blocking interaction.
//!
//! # Components
//!
//! - [`Notification`] - A live instance and its lifecycle state
//! - [`Manager`] - Owns instances and dismiss timers, reacts to events
//! - [`Toast`] - Widget rendering the stack in the bottom-right corner
//! - [`parse_initial_payload`] - Loosely-typed JSON payloads
//!
//! # Usage
//!
//! ```ignore
//! let mut manager = Manager::new(Some(surface));
//! manager.submit(NotificationRequest::success("Logged in"));
//!
//! // On each frame and tick
//! manager.frame(now);
//! manager.tick(now);
//! ```

mod manager;
mod notification;
mod payload;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{DismissTimer, Notification, NotificationState};
pub use payload::parse_initial_payload;
pub use toast::{accent, Toast, ToastEvent};
