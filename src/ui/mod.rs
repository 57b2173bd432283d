// SPDX-License-Identifier: MPL-2.0
//! User interface state machines and widgets.
//!
//! - [`notifications`] - Toast stack with timed dismiss and hover pause
//! - [`auth_panel`] - Disclosure panel controller for the account menu
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod auth_panel;
pub mod design_tokens;
pub mod notifications;
