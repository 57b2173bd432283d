// SPDX-License-Identifier: MPL-2.0
//! `authbar` is a compact account bar built with the Iced GUI framework.
//!
//! It combines a toast notification manager (hover-pausable, timed,
//! with exit transitions) and an accessible disclosure panel for logging in
//! and out, keeping the session in a store shared across running instances.

#![doc(html_root_url = "https://docs.rs/authbar/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
