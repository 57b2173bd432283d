// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI timing values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Timing Bounds
// =============================================================================

/// Notification timing bounds (milliseconds).
pub mod timing_bounds {
    /// Default display duration.
    pub const DEFAULT_DISPLAY_MS: u64 = 4000;
    /// Floor of the post-hover grace window.
    pub const MIN_RESUME_GRACE_MS: u64 = 800;
    /// Default exit fade.
    pub const DEFAULT_EXIT_MS: u64 = 250;
    /// Longest exit fade accepted.
    pub const MAX_EXIT_MS: u64 = 2000;
}

// =============================================================================
// DisplayDuration
// =============================================================================

/// How long a notification stays visible before it starts exiting.
///
/// Always non-negative. There is no upper bound.
///
/// # Example
///
/// ```
/// use authbar::domain::ui::DisplayDuration;
/// use std::time::Duration;
///
/// let duration = DisplayDuration::from_millis(1000);
/// // The grace window after hover never drops below 800 ms.
/// assert_eq!(duration.resume_grace(), Duration::from_millis(800));
///
/// let long = DisplayDuration::from_millis(9000);
/// assert_eq!(long.resume_grace(), Duration::from_millis(3000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayDuration(u64);

impl DisplayDuration {
    /// Creates a duration from milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a duration from a signed millisecond count.
    ///
    /// Negative values mean "expire immediately".
    #[must_use]
    pub fn from_signed_millis(millis: i64) -> Self {
        Self::from_millis(u64::try_from(millis).unwrap_or(0))
    }

    /// Returns the raw millisecond count.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a `Duration`.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns the timer length used when the pointer leaves a paused toast:
    /// a third of the display duration, but never less than 800 ms.
    #[must_use]
    pub fn resume_grace(self) -> Duration {
        Duration::from_millis((self.0 / 3).max(timing_bounds::MIN_RESUME_GRACE_MS))
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self(timing_bounds::DEFAULT_DISPLAY_MS)
    }
}

// =============================================================================
// ExitTransition
// =============================================================================

/// Length of the fade a host plays before acknowledging a toast's exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitTransition(u64);

impl ExitTransition {
    /// Creates an exit transition length, clamping to 0–2000 ms.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.min(timing_bounds::MAX_EXIT_MS))
    }

    /// Returns the value as a `Duration`.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns fade progress in `0.0..=1.0` after `elapsed`.
    #[must_use]
    pub fn progress(self, elapsed: Duration) -> f32 {
        if self.0 == 0 {
            return 1.0;
        }
        let ratio = elapsed.as_millis() as f64 / self.0 as f64;
        ratio.clamp(0.0, 1.0) as f32
    }
}

impl Default for ExitTransition {
    fn default() -> Self {
        Self(timing_bounds::DEFAULT_EXIT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================
