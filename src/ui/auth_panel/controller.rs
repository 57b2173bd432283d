// SPDX-License-Identifier: MPL-2.0
//! Disclosure panel controller.
//!
//! ```text
//! Closed --open/toggle--> Open --close/toggle/Escape/outside press--> Closed
//! ```
//!
//! While open, the controller traps Tab/Shift+Tab inside the panel: only the
//! wrap-around at either end is handled, inner moves are left to the host's
//! default focus traversal.

use super::focus::focusable_set;
use crate::application::port::{ElementId, PanelHost};

/// Open state of the single panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    /// Whether the panel is open and trapping keyboard focus.
    pub is_open: bool,
    /// Element focused when the panel opened; used to restore focus.
    pub last_focused_before_open: Option<ElementId>,
}

/// Where a pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// Inside the panel container.
    Panel,
    /// On the toggle affordance.
    Toggle,
    /// Anywhere else.
    Outside,
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    Escape,
    Tab,
    Other,
}

/// Whether a key press was consumed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The controller moved focus or closed the panel; suppress the default.
    Handled,
    /// The host applies its default behavior.
    Ignored,
}

/// Controller of the account disclosure panel.
#[derive(Debug, Default)]
pub struct Controller {
    state: PanelState,
}

impl Controller {
    /// Creates a closed controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the panel state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Returns whether the panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Opens a closed panel, closes an open one.
    pub fn toggle(&mut self, host: &mut impl PanelHost) {
        if self.state.is_open {
            self.close(host);
        } else {
            self.open(host);
        }
    }

    /// Opens the panel and moves focus to its first focusable element.
    ///
    /// No-op when already open. With nothing focusable inside, focus stays
    /// where it is.
    pub fn open(&mut self, host: &mut impl PanelHost) {
        if self.state.is_open {
            return;
        }
        host.set_expanded(true);
        self.state = PanelState {
            is_open: true,
            last_focused_before_open: host.focused(),
        };
        if let Some(first) = focusable_set(host).first() {
            host.focus(*first);
        }
    }

    /// Closes the panel.
    ///
    /// When focus was inside the panel it returns to the element focused
    /// before opening, or to the toggle if there was none. No-op when
    /// already closed.
    pub fn close(&mut self, host: &mut impl PanelHost) {
        if !self.state.is_open {
            return;
        }
        let focus_inside = host.focused().is_some_and(|id| host.panel_contains(id));
        host.set_expanded(false);
        let previous = self.state.last_focused_before_open.take();
        self.state.is_open = false;

        if focus_inside {
            let target = previous
                .filter(|id| !host.panel_contains(*id))
                .unwrap_or_else(|| host.toggle_element());
            host.focus(target);
        }
    }

    /// Closes the panel on a press outside both the panel and the toggle.
    ///
    /// Presses on the toggle are left to its own activation handler.
    pub fn pointer_pressed(&mut self, host: &mut impl PanelHost, region: HitRegion) {
        if self.state.is_open && region == HitRegion::Outside {
            tracing::trace!("press outside the account panel");
            self.close(host);
        }
    }

    /// Applies the keyboard trap while the panel is open.
    pub fn key_pressed(
        &mut self,
        host: &mut impl PanelHost,
        key: PanelKey,
        shift: bool,
    ) -> KeyOutcome {
        if !self.state.is_open {
            return KeyOutcome::Ignored;
        }
        match key {
            PanelKey::Escape => {
                self.close(host);
                let toggle = host.toggle_element();
                host.focus(toggle);
                KeyOutcome::Handled
            }
            PanelKey::Tab => Self::trap_tab(host, shift),
            PanelKey::Other => KeyOutcome::Ignored,
        }
    }

    fn trap_tab(host: &mut impl PanelHost, shift: bool) -> KeyOutcome {
        let focusable = focusable_set(host);
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return KeyOutcome::Ignored;
        };
        let focused = host.focused();

        if shift {
            if focused == Some(first) || focused == Some(host.panel_element()) {
                host.focus(last);
                return KeyOutcome::Handled;
            }
        } else if focused == Some(last) {
            host.focus(first);
            return KeyOutcome::Handled;
        }
        KeyOutcome::Ignored
    }
}
