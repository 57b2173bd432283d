// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`BufferCapacity`]: Number of events kept by the diagnostics log

mod newtypes;

pub use newtypes::{buffer_capacity_bounds, BufferCapacity};
