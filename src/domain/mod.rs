// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`notification`]: Notification requests ([`NotificationRequest`](notification::NotificationRequest),
//!   [`Severity`](notification::Severity))
//! - [`session`]: Session values ([`AccessToken`](session::AccessToken),
//!   [`Subject`](session::Subject), [`UserProfile`](session::UserProfile))
//! - [`ui`]: UI timing values ([`DisplayDuration`](ui::DisplayDuration),
//!   [`ExitTransition`](ui::ExitTransition))

pub mod diagnostics;
pub mod notification;
pub mod session;
pub mod ui;
