// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the auth bar.
//!
//! The `App` struct owns the two UI state machines (toast manager and
//! panel controller), the session glue and the adapters, and translates
//! messages into side effects like login requests or storage polling.

pub mod host;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::auth::{AuthSession, SessionKeys};
use crate::config;
use crate::diagnostics::{AppStateEvent, BufferCapacity, DiagnosticsCollector};
use crate::domain::notification::{Cause, NotificationRequest};
use crate::domain::ui::{DisplayDuration, ExitTransition};
use crate::infrastructure::{HttpSessionClient, SessionStore};
use crate::ui::auth_panel::{Controller, HitRegion};
use crate::ui::notifications::{self, Manager};
use host::{PanelModel, ToastSurface};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use update::{FormState, UpdateContext};

/// Root Iced application state.
pub struct App {
    /// Toast notification manager for user feedback.
    notifications: Manager<ToastSurface>,
    /// Open state, focus entry and trap of the account panel.
    panel: Controller,
    /// Logical markup the panel controller works on.
    panel_model: PanelModel,
    session: AuthSession<SessionStore>,
    /// `None` when the HTTP client could not be built; login then fails
    /// with a notification.
    client: Option<HttpSessionClient>,
    diagnostics: DiagnosticsCollector,
    form: FormState,
    /// Region under the pointer, used to classify presses.
    hover_region: Option<HitRegion>,
    /// Time of the last frame or tick.
    now: Instant,
    diagnostics_out: Option<PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("panel_open", &self.panel.is_open())
            .field("signed_in", &self.session.is_authenticated())
            .field("live_notifications", &self.notifications.live_count())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: f32 = 480.0;
pub const WINDOW_DEFAULT_WIDTH: f32 = 720.0;
pub const MIN_WINDOW_HEIGHT: f32 = 320.0;
pub const MIN_WINDOW_WIDTH: f32 = 420.0;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        // Close requests go through `update` so the diagnostics report can be written.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires Fn for boot, the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings, opens the session store and shows the start-up toasts.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        if let Some(url) = flags.api_base_url {
            config.session.api_base_url = Some(url);
        }

        let diagnostics = DiagnosticsCollector::new(BufferCapacity::new(
            config
                .diagnostics
                .buffer_capacity
                .unwrap_or(config::DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        ));

        let surface = ToastSurface::new(ExitTransition::from_millis(
            config
                .notifications
                .exit_transition_ms
                .unwrap_or(config::DEFAULT_EXIT_TRANSITION_MS),
        ));
        let mut notifications = Manager::new(Some(surface)).with_default_duration(
            DisplayDuration::from_millis(
                config
                    .notifications
                    .default_duration_ms
                    .unwrap_or(config::DEFAULT_NOTIFICATION_DURATION_MS),
            ),
        );
        notifications.set_diagnostics(diagnostics.handle());

        let client = match HttpSessionClient::from_config(&config.session) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!("HTTP client unavailable: {err}");
                None
            }
        };

        let session = AuthSession::new(
            SessionStore::open_default(),
            SessionKeys::from_config(&config.session),
        );
        let form = FormState {
            acting_user: session.acting_user().unwrap_or_default(),
            ..FormState::default()
        };

        let mut app = App {
            notifications,
            panel: Controller::new(),
            panel_model: PanelModel::default(),
            session,
            client,
            diagnostics,
            form,
            hover_region: None,
            now: Instant::now(),
            diagnostics_out: flags.diagnostics_out.map(PathBuf::from),
        };

        if let Some(warning) = config_warning {
            app.notifications.submit(
                NotificationRequest::warn(warning).with_cause(Cause::Configuration),
            );
        }
        if let Some(request) = flags.initial_toast.as_deref().and_then(|raw| {
            notifications::parse_initial_payload(raw, config.notifications.payload_fallback)
        }) {
            app.notifications.submit(request);
        }

        app.diagnostics.log_state(AppStateEvent::Started);
        let mut ctx = app.update_context();
        ctx.refresh_status();
        let task = update::lookup_profile(&mut ctx);
        (app, task)
    }

    fn title(&self) -> String {
        match self.session.display_name() {
            Some(name) => format!("AuthBar · {name}"),
            None => "AuthBar".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        let animating = self.notifications.needs_frame()
            || self
                .notifications
                .surface()
                .is_some_and(ToastSurface::is_animating);

        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_frame_subscription(animating),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
            subscription::create_storage_subscription(),
        ])
    }

    fn update_context(&mut self) -> UpdateContext<'_> {
        UpdateContext {
            notifications: &mut self.notifications,
            panel: &mut self.panel,
            panel_model: &mut self.panel_model,
            session: &mut self.session,
            client: self.client.as_ref(),
            diagnostics: &mut self.diagnostics,
            form: &mut self.form,
            hover_region: &mut self.hover_region,
            now: &mut self.now,
            diagnostics_out: self.diagnostics_out.as_ref(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();
        match message {
            Message::Panel(panel_message) => update::handle_panel_message(&mut ctx, panel_message),
            Message::Notification(event) => {
                update::handle_toast_event(&mut ctx, event, Instant::now());
                Task::none()
            }
            Message::Frame(now) => {
                update::handle_frame(&mut ctx, now);
                Task::none()
            }
            Message::Tick(now) => {
                update::handle_tick(&mut ctx, now);
                Task::none()
            }
            Message::PollStorage => update::handle_storage_poll(&mut ctx),
            Message::KeyPressed { key, shift } => update::handle_key(&mut ctx, key, shift),
            Message::PointerPressed => update::handle_pointer_pressed(&mut ctx),
            Message::LoginCompleted(result) => update::handle_login_completed(&mut ctx, result),
            Message::ProfileLoaded { subject, result } => {
                update::handle_profile_loaded(&mut ctx, &subject, result)
            }
            Message::WindowCloseRequested(id) => update::handle_close_requested(&mut ctx, id),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            panel_model: &self.panel_model,
            form: &self.form,
            notifications: &self.notifications,
            now: self.now,
        })
    }
}
