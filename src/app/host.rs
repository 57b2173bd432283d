// SPDX-License-Identifier: MPL-2.0
//! Host-side models behind the panel and the toast stack.
//!
//! iced widgets have no persistent element identity or document focus, so
//! the host keeps a logical model of both:
//!
//! - [`PanelModel`] tracks the exposed open state, which element holds
//!   focus and what the status indicator shows. Focus moves are queued and
//!   turned into widget operations by the update loop.
//! - [`ToastSurface`] tracks mounted toasts and times their exit fade.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::application::port::{
    ElementId, FocusCandidate, NotificationSurface, PanelHost, StatusDisplay, StatusView,
};
use crate::domain::notification::{NotificationId, NotificationRequest};
use crate::domain::session::AuthSnapshot;
use crate::domain::ui::ExitTransition;
use crate::ui::auth_panel::{element, status_display};

// =============================================================================
// Panel
// =============================================================================

/// Logical state of the header bar markup.
#[derive(Debug)]
pub struct PanelModel {
    expanded: bool,
    focused: Option<ElementId>,
    status: StatusDisplay,
    login_pending: bool,
    focus_requests: Vec<ElementId>,
}

impl Default for PanelModel {
    fn default() -> Self {
        Self {
            expanded: false,
            focused: None,
            status: status_display(&AuthSnapshot::signed_out()),
            login_pending: false,
            focus_requests: Vec::new(),
        }
    }
}

impl PanelModel {
    /// Returns whether the panel is shown.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns the rendered status indicator.
    #[must_use]
    pub fn status(&self) -> &StatusDisplay {
        &self.status
    }

    /// Returns whether a login request is in flight.
    #[must_use]
    pub fn login_pending(&self) -> bool {
        self.login_pending
    }

    /// Disables the login button while a request is in flight.
    pub fn set_login_pending(&mut self, pending: bool) {
        self.login_pending = pending;
    }

    /// Records focus moved by the user (typing into a field, for instance)
    /// without issuing a widget operation.
    pub fn note_focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    /// Drains the focus moves requested since the last call.
    pub fn take_focus_requests(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.focus_requests)
    }

    /// Default focus traversal: moves to the next (or previous) focusable
    /// element in document order, wrapping at the ends.
    ///
    /// Document order is the toggle followed by the panel contents.
    pub fn traverse(&mut self, forward: bool) -> ElementId {
        let order: Vec<ElementId> = std::iter::once(element::TOGGLE)
            .chain(
                self.focus_candidates()
                    .into_iter()
                    .filter(FocusCandidate::is_focusable)
                    .map(|candidate| candidate.id),
            )
            .collect();
        let len = order.len();
        let next = match self.focused.and_then(|id| order.iter().position(|o| *o == id)) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        let target = order[next];
        self.focus(target);
        target
    }
}

impl PanelHost for PanelModel {
    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
        self.focus_requests.push(id);
    }

    fn toggle_element(&self) -> ElementId {
        element::TOGGLE
    }

    fn panel_element(&self) -> ElementId {
        element::PANEL
    }

    fn focus_candidates(&self) -> Vec<FocusCandidate> {
        let login = self.expanded && self.status.login_visible;
        let logout = self.expanded && self.status.logout_visible;
        vec![
            FocusCandidate {
                rendered: login,
                ..FocusCandidate::enabled(element::USER_ID)
            },
            FocusCandidate {
                rendered: login,
                ..FocusCandidate::enabled(element::PASSWORD)
            },
            FocusCandidate {
                id: element::LOGIN,
                disabled: self.login_pending,
                rendered: login,
            },
            FocusCandidate {
                rendered: logout,
                ..FocusCandidate::enabled(element::ACTING_USER)
            },
            FocusCandidate {
                rendered: logout,
                ..FocusCandidate::enabled(element::LOGOUT)
            },
        ]
    }
}

impl StatusView for PanelModel {
    fn render_status(&mut self, status: &StatusDisplay) {
        self.status = status.clone();
    }
}

// =============================================================================
// Toasts
// =============================================================================

/// Mount point of the toast stack.
///
/// An exit fade starts on the first [`advance`](Self::advance) after
/// `begin_exit`, and is reported finished once the configured transition
/// length has elapsed.
#[derive(Debug, Default)]
pub struct ToastSurface {
    transition: ExitTransition,
    mounted: Vec<NotificationId>,
    exiting: BTreeMap<NotificationId, Option<Instant>>,
}

impl ToastSurface {
    /// Creates a surface playing exit fades of `transition`.
    #[must_use]
    pub fn new(transition: ExitTransition) -> Self {
        Self {
            transition,
            ..Self::default()
        }
    }

    /// Returns the mounted toasts, in stacking order.
    #[must_use]
    pub fn mounted(&self) -> &[NotificationId] {
        &self.mounted
    }

    /// Returns whether an exit fade is playing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.exiting.is_empty()
    }

    /// Moves the fades forward and returns the toasts whose fade completed.
    pub fn advance(&mut self, now: Instant) -> Vec<NotificationId> {
        let transition = self.transition;
        self.exiting
            .iter_mut()
            .filter_map(|(id, started)| {
                let started = *started.get_or_insert(now);
                let elapsed = now.saturating_duration_since(started);
                (transition.progress(elapsed) >= 1.0).then_some(*id)
            })
            .collect()
    }

    /// Returns the opacity of a toast at `now`.
    #[must_use]
    pub fn alpha(&self, id: NotificationId, now: Instant) -> f32 {
        match self.exiting.get(&id) {
            None | Some(None) => 1.0,
            Some(Some(started)) => {
                1.0 - self
                    .transition
                    .progress(now.saturating_duration_since(*started))
            }
        }
    }
}

impl NotificationSurface for ToastSurface {
    fn mount(&mut self, id: NotificationId, request: &NotificationRequest) {
        tracing::trace!("mount {id} ({})", request.severity().as_str());
        self.mounted.push(id);
    }

    fn begin_exit(&mut self, id: NotificationId) {
        self.exiting.entry(id).or_insert(None);
    }

    fn unmount(&mut self, id: NotificationId) {
        self.mounted.retain(|mounted| *mounted != id);
        self.exiting.remove(&id);
    }
}
