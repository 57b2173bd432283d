// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios across the toast manager, the panel controller and
//! the session glue, wired to the same host models the application uses.

use authbar::app::host::{PanelModel, ToastSurface};
use authbar::application::auth::{AuthSession, SessionKeys};
use authbar::application::port::{
    ChangeFeed, ElementId, FocusCandidate, KeyValueStore, PanelHost, SessionError,
};
use authbar::domain::notification::{NotificationRequest, Severity};
use authbar::domain::session::{AccessToken, UserProfile};
use authbar::domain::ui::{DisplayDuration, ExitTransition};
use authbar::infrastructure::MemoryStore;
use authbar::ui::auth_panel::{
    element, update_auth_ui, Controller, HitRegion, KeyOutcome, PanelKey, NOT_SIGNED_IN, SIGNED_IN,
};
use authbar::ui::notifications::{Manager, NotificationState};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use std::time::{Duration, Instant};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn toasts() -> Manager<ToastSurface> {
    Manager::new(Some(ToastSurface::new(ExitTransition::from_millis(200))))
}

fn jwt(sub: &str) -> AccessToken {
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{sub}"}}"#));
    AccessToken::new(format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")).expect("non-empty token")
}

/// Runs frames until every exiting toast is gone.
fn drain_exits(manager: &mut Manager<ToastSurface>, now: Instant) {
    let finished = manager
        .surface_mut()
        .map(|surface| surface.advance(now))
        .unwrap_or_default();
    for id in finished {
        manager.exit_transition_ended(id);
    }
}

/// Minimal host with a fixed list of focusable elements.
#[derive(Debug, Default)]
struct ListHost {
    expanded: bool,
    focused: Option<ElementId>,
    items: Vec<ElementId>,
}

impl PanelHost for ListHost {
    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    fn toggle_element(&self) -> ElementId {
        element::TOGGLE
    }

    fn panel_element(&self) -> ElementId {
        element::PANEL
    }

    fn focus_candidates(&self) -> Vec<FocusCandidate> {
        self.items
            .iter()
            .map(|id| FocusCandidate {
                rendered: self.expanded,
                ..FocusCandidate::enabled(*id)
            })
            .collect()
    }
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn hover_pause_moves_the_exit_past_the_first_deadline() {
    let mut manager = toasts();
    let t0 = Instant::now();
    let id = manager
        .submit(NotificationRequest::info("Saved").with_duration(DisplayDuration::from_millis(1000)))
        .expect("surface is present");

    manager.frame(t0);
    assert_eq!(manager.state(id), NotificationState::Visible);

    manager.tick(t0 + ms(400));
    assert!(manager.pointer_entered(id));
    manager.tick(t0 + ms(850));
    assert_eq!(manager.state(id), NotificationState::PausedForHover);

    // Leaving at 900 ms grants max(800 ms, 1000/3 ms) of grace.
    assert!(manager.pointer_left(id, t0 + ms(900)));

    manager.tick(t0 + ms(1000));
    assert_eq!(manager.state(id), NotificationState::Visible);
    manager.tick(t0 + ms(1699));
    assert_eq!(manager.state(id), NotificationState::Visible);
    manager.tick(t0 + ms(1700));
    assert_eq!(manager.state(id), NotificationState::Exiting);

    drain_exits(&mut manager, t0 + ms(1700));
    assert_eq!(manager.state(id), NotificationState::Exiting);
    drain_exits(&mut manager, t0 + ms(1900));
    assert_eq!(manager.state(id), NotificationState::Removed);
    assert!(!manager.has_notifications());
}

#[test]
fn long_display_duration_is_honored_in_full() {
    let mut manager = toasts();
    let t0 = Instant::now();
    let twenty_minutes = 20 * 60 * 1000;
    let id = manager
        .submit(
            NotificationRequest::info("Export running")
                .with_duration(DisplayDuration::from_millis(twenty_minutes)),
        )
        .expect("surface is present");
    manager.frame(t0);

    manager.tick(t0 + ms(10 * 60 * 1000 + 1));
    assert_eq!(manager.state(id), NotificationState::Visible);
    manager.tick(t0 + ms(twenty_minutes - 1));
    assert_eq!(manager.state(id), NotificationState::Visible);
    manager.tick(t0 + ms(twenty_minutes));
    assert_eq!(manager.state(id), NotificationState::Exiting);
}

#[test]
fn dismiss_is_idempotent_and_removal_waits_for_the_fade() {
    let mut manager = toasts();
    let t0 = Instant::now();
    let id = manager
        .submit(NotificationRequest::warn("Careful"))
        .expect("surface is present");
    manager.frame(t0);

    assert!(manager.dismiss(id));
    assert!(!manager.dismiss(id));
    assert_eq!(manager.state(id), NotificationState::Exiting);

    // Hovering an exiting toast changes nothing.
    assert!(!manager.pointer_entered(id));
    assert_eq!(manager.state(id), NotificationState::Exiting);

    drain_exits(&mut manager, t0);
    drain_exits(&mut manager, t0 + ms(250));
    assert_eq!(manager.state(id), NotificationState::Removed);
    assert!(!manager.dismiss(id));
    assert!(manager
        .surface()
        .is_some_and(|surface| surface.mounted().is_empty()));
}

#[test]
fn notifications_are_dropped_without_a_surface() {
    let mut manager: Manager<ToastSurface> = Manager::new(None);
    assert!(manager.submit(NotificationRequest::error("lost")).is_none());
    assert_eq!(manager.live_count(), 0);
}

// =============================================================================
// Panel
// =============================================================================

#[test]
fn tab_from_last_element_wraps_to_first() {
    let mut panel = Controller::new();
    let mut host = PanelModel::default();

    panel.open(&mut host);
    assert!(host.is_expanded());
    assert_eq!(host.focused(), Some(element::USER_ID));

    host.note_focus(element::LOGIN);
    let outcome = panel.key_pressed(&mut host, PanelKey::Tab, false);
    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(host.focused(), Some(element::USER_ID));

    let outcome = panel.key_pressed(&mut host, PanelKey::Tab, true);
    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(host.focused(), Some(element::LOGIN));
}

#[test]
fn inner_tab_is_left_to_default_traversal() {
    let mut panel = Controller::new();
    let mut host = PanelModel::default();
    panel.open(&mut host);

    let outcome = panel.key_pressed(&mut host, PanelKey::Tab, false);
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(host.traverse(true), element::PASSWORD);
    assert_eq!(host.focused(), Some(element::PASSWORD));
}

#[test]
fn escape_returns_focus_to_toggle_even_after_focus_drifted_outside() {
    let mut panel = Controller::new();
    let mut host = PanelModel::default();
    panel.open(&mut host);

    host.note_focus(ElementId::new("search"));
    let outcome = panel.key_pressed(&mut host, PanelKey::Escape, false);

    assert_eq!(outcome, KeyOutcome::Handled);
    assert!(!panel.is_open());
    assert!(!host.is_expanded());
    assert_eq!(host.focused(), Some(element::TOGGLE));
}

#[test]
fn outside_press_closes_and_restores_previous_focus() {
    let search = ElementId::new("search");
    let mut panel = Controller::new();
    let mut host = PanelModel::default();
    host.note_focus(search);
    panel.open(&mut host);

    panel.pointer_pressed(&mut host, HitRegion::Panel);
    assert!(panel.is_open());
    panel.pointer_pressed(&mut host, HitRegion::Toggle);
    assert!(panel.is_open());

    panel.pointer_pressed(&mut host, HitRegion::Outside);
    assert!(!panel.is_open());
    assert_eq!(host.focused(), Some(search));
}

#[test]
fn single_focusable_element_wraps_to_itself() {
    let only = ElementId::new("only");
    let mut panel = Controller::new();
    let mut host = ListHost {
        items: vec![only],
        ..ListHost::default()
    };
    panel.open(&mut host);
    assert_eq!(host.focused, Some(only));

    assert_eq!(
        panel.key_pressed(&mut host, PanelKey::Tab, false),
        KeyOutcome::Handled
    );
    assert_eq!(host.focused, Some(only));
    assert_eq!(
        panel.key_pressed(&mut host, PanelKey::Tab, true),
        KeyOutcome::Handled
    );
    assert_eq!(host.focused, Some(only));
}

#[test]
fn opening_an_empty_panel_keeps_focus_and_ignores_tab() {
    let outside = ElementId::new("search");
    let mut panel = Controller::new();
    let mut host = ListHost {
        focused: Some(outside),
        ..ListHost::default()
    };

    panel.open(&mut host);
    assert!(panel.is_open());
    assert!(host.expanded);
    assert_eq!(host.focused, Some(outside));
    assert_eq!(
        panel.key_pressed(&mut host, PanelKey::Tab, false),
        KeyOutcome::Ignored
    );
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn rejected_login_shows_one_error_with_the_detail() {
    let mut manager = toasts();
    let mut session = AuthSession::new(MemoryStore::new(), SessionKeys::default());

    let attempt = session
        .begin_login("alice", "wrong", &mut manager)
        .expect("user id is present");
    assert_eq!(attempt.password.as_deref(), Some("wrong"));

    let next = session.complete_login(
        Err(SessionError::Rejected {
            detail: "bad credentials".to_string(),
        }),
        &mut manager,
    );

    assert!(next.is_none());
    assert!(!session.is_authenticated());
    assert_eq!(manager.live_count(), 1);
    let toast = manager.live().next().expect("one toast");
    assert_eq!(toast.severity(), Severity::Error);
    assert!(toast.message().contains("bad credentials"));
}

#[test]
fn successful_login_then_profile_renders_the_name() {
    let mut manager = toasts();
    let mut panel_model = PanelModel::default();
    let mut session = AuthSession::new(MemoryStore::new(), SessionKeys::default());

    let subject = session
        .complete_login(Ok(jwt("u-42")), &mut manager)
        .expect("profile must be looked up");
    assert_eq!(subject.as_str(), "u-42");

    let changed = session.complete_profile_lookup(
        &subject,
        Ok(UserProfile::new("Ada Lovelace")),
        &mut manager,
    );
    assert!(changed);

    update_auth_ui(&mut panel_model, &session.snapshot());
    let status = panel_model.status();
    assert_eq!(status.status_text, SIGNED_IN);
    assert_eq!(status.account_label, "Account · Ada Lovelace");
    assert_eq!(status.avatar_initials.as_deref(), Some("AL"));
    assert!(status.logout_visible);
    assert!(!status.login_visible);
}

#[test]
fn token_change_in_another_instance_clears_the_profile() {
    let keys = SessionKeys::default();
    let mut manager = toasts();
    let mut panel_model = PanelModel::default();
    let store = MemoryStore::new();
    let mut other = store.fork();
    let mut session = AuthSession::new(store, keys.clone());

    let subject = session
        .complete_login(Ok(jwt("u-1")), &mut manager)
        .expect("profile must be looked up");
    session.complete_profile_lookup(&subject, Ok(UserProfile::new("Ada")), &mut manager);
    update_auth_ui(&mut panel_model, &session.snapshot());
    assert_eq!(panel_model.status().account_label, "Account · Ada");

    other
        .set(&keys.token, jwt("u-2").as_str())
        .expect("memory store accepts writes");

    let changes = session.store_mut().poll_changes();
    assert!(changes.iter().any(|change| change.key == keys.token));
    let token_changed = changes
        .iter()
        .fold(false, |acc, change| session.on_storage_change(change) || acc);
    assert!(token_changed);

    update_auth_ui(&mut panel_model, &session.snapshot());
    assert_eq!(panel_model.status().status_text, SIGNED_IN);
    assert_eq!(panel_model.status().account_label, "Account");
    assert_eq!(panel_model.status().avatar_initials, None);
    assert!(other.get(&keys.profile).is_none());

    // A late profile for the previous subject is discarded.
    assert!(!session.complete_profile_lookup(&subject, Ok(UserProfile::new("Ada")), &mut manager));
}

#[test]
fn logout_removes_token_and_renders_signed_out() {
    let mut manager = toasts();
    let mut panel_model = PanelModel::default();
    let mut session = AuthSession::new(MemoryStore::new(), SessionKeys::default());
    session.complete_login(Ok(jwt("u-7")), &mut manager);

    session.logout(&mut manager);
    update_auth_ui(&mut panel_model, &session.snapshot());

    assert!(!session.is_authenticated());
    assert_eq!(panel_model.status().status_text, NOT_SIGNED_IN);
    assert!(panel_model.status().login_visible);
    assert!(manager.live().any(|toast| toast.message() == "Logged out"));
}
