// SPDX-License-Identifier: MPL-2.0
//! Focusable set computation.

use crate::application::port::{ElementId, PanelHost};

/// Returns the elements inside the panel that can take focus, in document
/// order.
///
/// Computed from the host on every call: the panel content changes between
/// opens (login form vs. logout button), so the set is never cached.
#[must_use]
pub fn focusable_set(host: &impl PanelHost) -> Vec<ElementId> {
    host.focus_candidates()
        .into_iter()
        .filter(|candidate| candidate.is_focusable())
        .map(|candidate| candidate.id)
        .collect()
}
