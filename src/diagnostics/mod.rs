// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! This module captures diagnostic events while the auth bar runs, keeps
//! them in a memory-bounded log, and exports them as JSON.
//!
//! # Architecture
//!
//! - [`DiagnosticsCollector`]: Owns the log and drains the event channel
//! - [`DiagnosticsHandle`]: Cloneable, non-blocking sender
//! - [`DiagnosticEvent`]: Timestamped user action, state change, warning or error
//!
//! # Privacy
//!
//! Warning and error messages pass through [`sanitize_message`], which masks
//! bearer tokens and JWT-shaped strings before they are stored.

mod collector;
mod events;
mod report;
mod sanitizer;

pub use crate::domain::diagnostics::BufferCapacity;
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppStateEvent, CloseReason, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction,
    WarningEvent,
};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
