// SPDX-License-Identifier: MPL-2.0
//! Session glue: login, logout, profile caching and the acting user id.
//!
//! - [`AuthSession`]: Session state over a [`KeyValueStore`](crate::application::port::KeyValueStore)
//! - [`token_subject`]: Reads the `sub` claim out of a JWT

mod profile_cache;
mod session;
mod token;

pub use session::{AuthSession, LoginAttempt, SessionKeys};
pub use token::token_subject;
