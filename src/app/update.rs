// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! The notification manager and the panel controller never call each
//! other: every handler here receives both through [`UpdateContext`] and
//! routes session outcomes to the manager and re-renders to the panel.

use super::host::{PanelModel, ToastSurface};
use super::Message;
use crate::application::auth::AuthSession;
use crate::application::port::{
    ChangeFeed, CredentialService, ElementId, ProfileLookup, SessionError,
};
use crate::diagnostics::{AppStateEvent, CloseReason, DiagnosticsCollector, UserAction};
use crate::domain::notification::{Cause, NotificationRequest};
use crate::domain::session::{AccessToken, Subject, UserProfile};
use crate::infrastructure::{HttpSessionClient, SessionStore};
use crate::ui::auth_panel::{
    element, update_auth_ui, view as panel_view, Controller, HitRegion, KeyOutcome, PanelKey,
};
use crate::ui::notifications::{Manager, ToastEvent};
use iced::widget::operation;
use iced::{window, Task};
use std::path::PathBuf;
use std::time::Instant;

/// Contents of the panel's text fields.
#[derive(Debug, Default)]
pub struct FormState {
    pub user_id: String,
    pub password: String,
    pub acting_user: String,
}

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub notifications: &'a mut Manager<ToastSurface>,
    pub panel: &'a mut Controller,
    pub panel_model: &'a mut PanelModel,
    pub session: &'a mut AuthSession<SessionStore>,
    pub client: Option<&'a HttpSessionClient>,
    pub diagnostics: &'a mut DiagnosticsCollector,
    pub form: &'a mut FormState,
    pub hover_region: &'a mut Option<HitRegion>,
    pub now: &'a mut Instant,
    pub diagnostics_out: Option<&'a PathBuf>,
}

impl UpdateContext<'_> {
    /// Re-renders the status indicator from the session.
    pub fn refresh_status(&mut self) {
        update_auth_ui(self.panel_model, &self.session.snapshot());
    }

    fn log_close(&mut self, was_open: bool, reason: CloseReason) {
        if was_open && !self.panel.is_open() {
            self.diagnostics
                .log_action(UserAction::ClosePanel { reason });
            // The panel is gone, so its exit event will not arrive.
            if *self.hover_region == Some(HitRegion::Panel) {
                *self.hover_region = None;
            }
        }
    }
}

/// Turns queued focus moves into a widget operation.
///
/// Only text fields take widget focus; buttons are focused logically and
/// shown with a focus ring.
pub fn focus_task(panel_model: &mut PanelModel) -> Task<Message> {
    match panel_model.take_focus_requests().last() {
        Some(&id) if is_text_field(id) => operation::focus(panel_view::widget_id(id)),
        _ => Task::none(),
    }
}

fn is_text_field(id: ElementId) -> bool {
    [element::USER_ID, element::PASSWORD, element::ACTING_USER].contains(&id)
}

/// Starts the profile lookup for the current token, if one is needed.
pub fn lookup_profile(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    match ctx.session.profile_subject() {
        Some(subject) => spawn_profile_lookup(ctx.client, subject),
        None => {
            if ctx.session.display_name().is_some() {
                ctx.diagnostics
                    .log_state(AppStateEvent::ProfileResolved { from_cache: true });
                ctx.refresh_status();
            }
            Task::none()
        }
    }
}

fn spawn_profile_lookup(client: Option<&HttpSessionClient>, subject: Subject) -> Task<Message> {
    let Some(client) = client.cloned() else {
        return Task::none();
    };
    Task::perform(
        async move {
            let result = client.get_user(subject.clone()).await;
            (subject, result)
        },
        |(subject, result): (Subject, Result<Option<UserProfile>, SessionError>)| {
            Message::ProfileLoaded { subject, result }
        },
    )
}

/// Handles header bar and panel messages.
pub fn handle_panel_message(
    ctx: &mut UpdateContext<'_>,
    message: panel_view::Message,
) -> Task<Message> {
    match message {
        panel_view::Message::TogglePressed => {
            let was_open = ctx.panel.is_open();
            ctx.panel_model.note_focus(element::TOGGLE);
            ctx.panel.toggle(ctx.panel_model);
            if ctx.panel.is_open() {
                ctx.diagnostics.log_action(UserAction::OpenPanel);
            }
            ctx.log_close(was_open, CloseReason::Toggle);
            focus_task(ctx.panel_model)
        }
        panel_view::Message::UserIdChanged(value) => {
            ctx.panel_model.note_focus(element::USER_ID);
            ctx.form.user_id = value;
            Task::none()
        }
        panel_view::Message::PasswordChanged(value) => {
            ctx.panel_model.note_focus(element::PASSWORD);
            ctx.form.password = value;
            Task::none()
        }
        panel_view::Message::ActingUserChanged(value) => {
            ctx.panel_model.note_focus(element::ACTING_USER);
            ctx.form.acting_user = value;
            Task::none()
        }
        panel_view::Message::LoginPressed => handle_login(ctx),
        panel_view::Message::LogoutPressed => {
            ctx.session.logout(ctx.notifications);
            ctx.form.password.clear();
            ctx.diagnostics.log_action(UserAction::Logout);
            ctx.diagnostics
                .log_state(AppStateEvent::SessionChanged { signed_in: false });
            ctx.refresh_status();
            Task::none()
        }
        panel_view::Message::ActingUserSubmitted => {
            ctx.session
                .set_acting_user(&ctx.form.acting_user, ctx.notifications);
            ctx.form.acting_user = ctx.session.acting_user().unwrap_or_default();
            ctx.diagnostics.log_action(UserAction::SetActingUser);
            Task::none()
        }
        panel_view::Message::PointerEntered(region) => {
            *ctx.hover_region = Some(region);
            Task::none()
        }
        panel_view::Message::PointerLeft => {
            *ctx.hover_region = None;
            Task::none()
        }
    }
}

fn handle_login(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.panel_model.login_pending() {
        return Task::none();
    }
    let Some(attempt) =
        ctx.session
            .begin_login(&ctx.form.user_id, &ctx.form.password, ctx.notifications)
    else {
        return Task::none();
    };
    let Some(client) = ctx.client.cloned() else {
        ctx.notifications.submit(
            NotificationRequest::error("Login failed").with_cause(Cause::Configuration),
        );
        return Task::none();
    };

    ctx.diagnostics.log_action(UserAction::Login);
    ctx.panel_model.set_login_pending(true);
    Task::perform(
        async move { client.login(attempt.user_id, attempt.password).await },
        Message::LoginCompleted,
    )
}

/// Applies the result of a login request.
pub fn handle_login_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<AccessToken, SessionError>,
) -> Task<Message> {
    ctx.panel_model.set_login_pending(false);
    let succeeded = result.is_ok();
    let subject = ctx.session.complete_login(result, ctx.notifications);
    if !succeeded {
        return Task::none();
    }

    ctx.form.password.clear();
    ctx.diagnostics
        .log_state(AppStateEvent::SessionChanged { signed_in: true });
    ctx.refresh_status();
    match subject {
        Some(subject) => spawn_profile_lookup(ctx.client, subject),
        None => {
            if ctx.session.display_name().is_some() {
                ctx.diagnostics
                    .log_state(AppStateEvent::ProfileResolved { from_cache: true });
            }
            Task::none()
        }
    }
}

/// Applies the result of a profile lookup.
pub fn handle_profile_loaded(
    ctx: &mut UpdateContext<'_>,
    subject: &Subject,
    result: Result<Option<UserProfile>, SessionError>,
) -> Task<Message> {
    if ctx
        .session
        .complete_profile_lookup(subject, result, ctx.notifications)
    {
        ctx.diagnostics
            .log_state(AppStateEvent::ProfileResolved { from_cache: false });
        ctx.refresh_status();
    }
    Task::none()
}

/// Handles Tab and Escape.
pub fn handle_key(ctx: &mut UpdateContext<'_>, key: PanelKey, shift: bool) -> Task<Message> {
    let was_open = ctx.panel.is_open();
    let outcome = ctx.panel.key_pressed(ctx.panel_model, key, shift);
    if outcome == KeyOutcome::Ignored && key == PanelKey::Tab {
        ctx.panel_model.traverse(!shift);
    }
    ctx.log_close(was_open, CloseReason::Escape);
    focus_task(ctx.panel_model)
}

/// Handles a mouse press anywhere in the window.
pub fn handle_pointer_pressed(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let was_open = ctx.panel.is_open();
    let region = ctx.hover_region.unwrap_or(HitRegion::Outside);
    ctx.panel.pointer_pressed(ctx.panel_model, region);
    ctx.log_close(was_open, CloseReason::OutsideClick);
    focus_task(ctx.panel_model)
}

/// Handles an interaction with a toast, observed at `now`.
pub fn handle_toast_event(ctx: &mut UpdateContext<'_>, event: ToastEvent, now: Instant) {
    if matches!(event, ToastEvent::Dismissed(_)) {
        ctx.diagnostics.log_action(UserAction::DismissNotification);
    }
    ctx.notifications.handle_message(&event.at(now));
    finish_exits(ctx, now);
}

/// Handles an animation frame.
pub fn handle_frame(ctx: &mut UpdateContext<'_>, now: Instant) {
    *ctx.now = now;
    ctx.notifications.frame(now);
    finish_exits(ctx, now);
}

/// Handles the periodic tick.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) {
    *ctx.now = now;
    ctx.notifications.tick(now);
    finish_exits(ctx, now);
    ctx.diagnostics.process_pending();
}

/// Acknowledges exit fades that completed.
fn finish_exits(ctx: &mut UpdateContext<'_>, now: Instant) {
    let finished = ctx
        .notifications
        .surface_mut()
        .map(|surface| surface.advance(now))
        .unwrap_or_default();
    for id in finished {
        ctx.notifications.exit_transition_ended(id);
    }
}

/// Reacts to keys changed by other running instances.
pub fn handle_storage_poll(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let changes = ctx.session.store_mut().poll_changes();
    if changes.is_empty() {
        return Task::none();
    }

    let mut token_changed = false;
    for change in &changes {
        tracing::debug!("storage key changed elsewhere: {}", change.key);
        ctx.diagnostics.log_state(AppStateEvent::ExternalStorageChange {
            key: change.key.clone(),
        });
        token_changed |= ctx.session.on_storage_change(change);
        if change.key == ctx.session.keys().acting_user {
            ctx.form.acting_user = ctx.session.acting_user().unwrap_or_default();
        }
    }

    if !token_changed {
        return Task::none();
    }
    ctx.diagnostics.log_state(AppStateEvent::SessionChanged {
        signed_in: ctx.session.is_authenticated(),
    });
    ctx.refresh_status();
    lookup_profile(ctx)
}

/// Writes the diagnostics report, if requested, and closes the window.
pub fn handle_close_requested(ctx: &mut UpdateContext<'_>, id: window::Id) -> Task<Message> {
    if let Some(path) = ctx.diagnostics_out {
        ctx.diagnostics.process_pending();
        match ctx.diagnostics.export_json() {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    tracing::warn!("failed to write diagnostics to {}: {err}", path.display());
                }
            }
            Err(err) => tracing::warn!("failed to serialize diagnostics: {err}"),
        }
    }
    window::close(id)
}
