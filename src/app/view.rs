// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The header bar (with the panel below it) and the toast stack are layered
//! in a single `Stack`; toasts float in the bottom-right corner.

use super::host::{PanelModel, ToastSurface};
use super::update::FormState;
use super::Message;
use crate::application::port::PanelHost;
use crate::ui::auth_panel::view::{self as panel_view, ViewContext as PanelViewContext};
use crate::ui::notifications::{Manager, Toast};
use iced::{
    widget::{Container, Stack},
    Element, Length,
};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub panel_model: &'a PanelModel,
    pub form: &'a FormState,
    pub notifications: &'a Manager<ToastSurface>,
    /// Time of the last frame, used for exit fades.
    pub now: Instant,
}

/// Renders the header bar and the toast overlay.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = panel_view::view(PanelViewContext {
        status: ctx.panel_model.status(),
        panel_open: ctx.panel_model.is_expanded(),
        focused: ctx.panel_model.focused(),
        user_id: &ctx.form.user_id,
        password: &ctx.form.password,
        acting_user: &ctx.form.acting_user,
        login_pending: ctx.panel_model.login_pending(),
    })
    .map(Message::Panel);

    let now = ctx.now;
    let surface = ctx.notifications.surface();
    let toasts = Toast::view_overlay(ctx.notifications, move |id| {
        surface.map_or(1.0, |surface| surface.alpha(id, now))
    })
    .map(Message::Notification);

    let layers = Stack::new()
        .push(
            Container::new(header)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill);

    Container::new(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
