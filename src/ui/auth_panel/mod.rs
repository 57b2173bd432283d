// SPDX-License-Identifier: MPL-2.0
//! Account disclosure panel.
//!
//! The panel sits under the account toggle in the header bar and holds the
//! login form, or the logout button and acting-user field once signed in.
//!
//! - [`Controller`] - Open/closed state, focus entry and restore, focus
//!   trap, escape and outside-click handling
//! - [`focusable_set`] - Elements that can take focus right now
//! - [`update_auth_ui`] - Re-render of the compact status indicator
//! - [`view`] - iced widgets for the toggle and the panel
//!
//! The controller only talks to the host through [`PanelHost`] and
//! [`StatusView`], so it can be driven by the iced host or by tests.
//!
//! [`PanelHost`]: crate::application::port::PanelHost
//! [`StatusView`]: crate::application::port::StatusView

mod controller;
mod focus;
mod status;
pub mod view;

pub use controller::{Controller, HitRegion, KeyOutcome, PanelKey, PanelState};
pub use focus::focusable_set;
pub use status::{status_display, update_auth_ui, NOT_SIGNED_IN, SIGNED_IN};

/// Element handles of the header bar markup.
pub mod element {
    use crate::application::port::ElementId;

    /// The account toggle button.
    pub const TOGGLE: ElementId = ElementId::new("auth-toggle-btn");
    /// The panel container.
    pub const PANEL: ElementId = ElementId::new("auth-panel");
    /// User id field of the login form.
    pub const USER_ID: ElementId = ElementId::new("login-user-id");
    /// Password field of the login form.
    pub const PASSWORD: ElementId = ElementId::new("login-password");
    /// Login button.
    pub const LOGIN: ElementId = ElementId::new("login-btn");
    /// Logout button.
    pub const LOGOUT: ElementId = ElementId::new("logout-btn");
    /// Acting user id field.
    pub const ACTING_USER: ElementId = ElementId::new("acting-user-id");
}
