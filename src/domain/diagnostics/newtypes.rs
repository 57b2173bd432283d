// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// Buffer Capacity Bounds
// =============================================================================

/// Event log capacity bounds (50 to 5000 events).
pub mod buffer_capacity_bounds {
    /// Minimum capacity.
    pub const MIN: usize = 50;
    /// Maximum capacity.
    pub const MAX: usize = 5000;
    /// Default capacity.
    pub const DEFAULT: usize = 500;
}

// =============================================================================
// BufferCapacity
// =============================================================================

/// Number of diagnostic events retained before the oldest are evicted.
///
/// Values outside 50–5000 are clamped on construction.
///
/// ```
/// use authbar::domain::diagnostics::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(10).value(), 50);
/// assert_eq!(BufferCapacity::new(800).value(), 800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}
