// SPDX-License-Identifier: MPL-2.0
//! Account panel host port definitions.
//!
//! The panel controller does not own any markup. It reads and writes the
//! exposed state of the toggle and the panel, moves focus, and asks the host
//! which elements inside the panel can currently take focus.

/// Stable handle of an element in the host markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(&'static str);

impl ElementId {
    /// Wraps an element name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the element name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// An interactive element inside the panel, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCandidate {
    /// The element.
    pub id: ElementId,
    /// Disabled elements cannot take focus.
    pub disabled: bool,
    /// Elements that are not rendered (hidden) cannot take focus.
    pub rendered: bool,
}

impl FocusCandidate {
    /// A rendered, enabled candidate.
    #[must_use]
    pub const fn enabled(id: ElementId) -> Self {
        Self {
            id,
            disabled: false,
            rendered: true,
        }
    }

    /// Returns whether the element can take focus right now.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        !self.disabled && self.rendered
    }
}

/// The markup hosting the panel and its toggle.
pub trait PanelHost {
    /// Reflects the open state on the toggle (expanded) and on the panel
    /// (shown and displayed, or hidden).
    fn set_expanded(&mut self, expanded: bool);

    /// Returns the element that currently has focus.
    fn focused(&self) -> Option<ElementId>;

    /// Moves focus to `id`.
    fn focus(&mut self, id: ElementId);

    /// Returns the toggle affordance.
    fn toggle_element(&self) -> ElementId;

    /// Returns the panel container.
    fn panel_element(&self) -> ElementId;

    /// Returns the interactive elements inside the panel, in document order.
    fn focus_candidates(&self) -> Vec<FocusCandidate>;

    /// Returns whether `id` is the panel container or one of its elements.
    fn panel_contains(&self, id: ElementId) -> bool {
        id == self.panel_element() || self.focus_candidates().iter().any(|c| c.id == id)
    }
}

/// Rendered state of the compact status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    /// "Signed in" or "Not signed in".
    pub status_text: &'static str,
    /// Whether the login affordance is shown.
    pub login_visible: bool,
    /// Whether the logout affordance is shown.
    pub logout_visible: bool,
    /// Accessible label of the toggle.
    pub account_label: String,
    /// Avatar initials; `None` hides the avatar.
    pub avatar_initials: Option<String>,
}

/// The markup displaying the status indicator.
pub trait StatusView {
    /// Replaces the rendered status.
    fn render_status(&mut self, status: &StatusDisplay);
}
