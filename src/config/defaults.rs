// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Toast display duration, hover grace, exit fade
//! - **Session**: Backend location and storage keys
//! - **Diagnostics**: Event log sizing
//! - **Host**: Timer tick and storage polling cadence

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default display duration of a notification (in milliseconds).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 4000;

/// Floor of the grace window granted after the pointer leaves a toast.
pub const MIN_RESUME_GRACE_MS: u64 = 800;

/// Default length of the toast exit fade (in milliseconds).
pub const DEFAULT_EXIT_TRANSITION_MS: u64 = 250;

/// Longest exit fade accepted from configuration (in milliseconds).
pub const MAX_EXIT_TRANSITION_MS: u64 = 2000;

// ==========================================================================
// Session Defaults
// ==========================================================================

/// Backend used for login and profile lookups.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Storage key holding the bearer token.
pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// Storage key holding the cached `{sub, name}` profile.
pub const DEFAULT_PROFILE_KEY: &str = "authProfile";

/// Storage key holding the acting user id.
pub const DEFAULT_ACTING_USER_KEY: &str = "actingUserId";

/// HTTP request timeout for session calls (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic event log capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 50;

/// Maximum diagnostic event log capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 5000;

// ==========================================================================
// Host Defaults
// ==========================================================================

/// Interval of the timer tick driving dismiss deadlines (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 100;

/// Interval between checks for storage changes made by other instances.
pub const STORAGE_POLL_INTERVAL_MS: u64 = 500;
