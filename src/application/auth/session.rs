// SPDX-License-Identifier: MPL-2.0
//! Login, logout and profile bookkeeping for the auth bar.
//!
//! [`AuthSession`] owns the persisted session material. It never performs
//! network calls itself: the host runs the [`CredentialService`] and
//! [`ProfileLookup`] futures and hands the results back through
//! [`AuthSession::complete_login`] and [`AuthSession::complete_profile_lookup`].
//!
//! [`CredentialService`]: crate::application::port::CredentialService
//! [`ProfileLookup`]: crate::application::port::ProfileLookup

use super::profile_cache::{encode_cached, read_cached};
use super::token::token_subject;
use crate::application::port::{KeyValueStore, Notifier, SessionError, StorageChange};
use crate::config::SessionConfig;
use crate::domain::notification::{Cause, NotificationRequest};
use crate::domain::session::{AccessToken, AuthSnapshot, Subject, UserProfile};

/// Storage keys used by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    /// Key of the bearer token.
    pub token: String,
    /// Key of the cached `{sub, name}` profile.
    pub profile: String,
    /// Key of the acting user id.
    pub acting_user: String,
}

impl SessionKeys {
    /// Reads the keys from the `[session]` settings.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            token: config.token_key().to_string(),
            profile: config.profile_key().to_string(),
            acting_user: config.acting_user_key().to_string(),
        }
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

/// Validated login form contents, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    /// Trimmed user id, never empty.
    pub user_id: String,
    /// Password; an empty field is sent as absent.
    pub password: Option<String>,
}

/// Session state backed by a key/value store.
#[derive(Debug)]
pub struct AuthSession<S> {
    store: S,
    keys: SessionKeys,
    display_name: Option<String>,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Creates a session over `store`.
    pub fn new(store: S, keys: SessionKeys) -> Self {
        Self {
            store,
            keys,
            display_name: None,
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably (to poll its change feed).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the storage keys in use.
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Returns the stored token.
    pub fn token(&self) -> Option<AccessToken> {
        self.store.get(&self.keys.token).and_then(AccessToken::new)
    }

    /// Returns whether a token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Returns the `Authorization` header for outgoing requests, if signed in.
    pub fn auth_header(&self) -> Option<(&'static str, String)> {
        self.token().map(|token| ("Authorization", token.bearer()))
    }

    /// Returns the last-known display name.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns what the status indicator should show.
    pub fn snapshot(&self) -> AuthSnapshot {
        if self.is_authenticated() {
            AuthSnapshot::signed_in(self.display_name.clone())
        } else {
            AuthSnapshot::signed_out()
        }
    }

    /// Returns the acting user id.
    pub fn acting_user(&self) -> Option<String> {
        self.store.get(&self.keys.acting_user)
    }

    /// Validates the login form.
    ///
    /// An empty user id is reported as a warning and nothing is sent.
    pub fn begin_login(
        &self,
        user_id: &str,
        password: &str,
        notifier: &mut impl Notifier,
    ) -> Option<LoginAttempt> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            notifier
                .notify(NotificationRequest::warn("Enter user id").with_cause(Cause::InvalidInput));
            return None;
        }
        Some(LoginAttempt {
            user_id: user_id.to_string(),
            password: (!password.is_empty()).then(|| password.to_string()),
        })
    }

    /// Applies the outcome of a login request.
    ///
    /// On success the token is stored and the subject whose profile must be
    /// fetched is returned (`None` when the cache already knows the name).
    /// On failure exactly one error notification is shown and nothing is
    /// stored.
    pub fn complete_login(
        &mut self,
        result: Result<AccessToken, SessionError>,
        notifier: &mut impl Notifier,
    ) -> Option<Subject> {
        match result {
            Ok(token) => {
                let key = self.keys.token.clone();
                self.write(&key, Some(token.as_str()));
                self.display_name = None;
                notifier.notify(NotificationRequest::success("Logged in"));
                self.profile_subject()
            }
            Err(SessionError::Rejected { detail }) => {
                tracing::debug!("login rejected: {detail}");
                notifier.notify(
                    NotificationRequest::error(format!("Login failed: {detail}"))
                        .with_cause(Cause::Authentication),
                );
                None
            }
            Err(err) => {
                tracing::debug!("login request failed: {err}");
                notifier
                    .notify(NotificationRequest::error("Login failed").with_cause(Cause::Network));
                None
            }
        }
    }

    /// Clears the token, the cached profile and the display name.
    pub fn logout(&mut self, notifier: &mut impl Notifier) {
        let (token_key, profile_key) = (self.keys.token.clone(), self.keys.profile.clone());
        self.write(&token_key, None);
        self.write(&profile_key, None);
        self.display_name = None;
        notifier.notify(NotificationRequest::info("Logged out"));
    }

    /// Resolves the display name for the current token.
    ///
    /// Returns the subject to look up, or `None` when there is no usable
    /// token or the cached profile already matched (in which case the
    /// display name is set from the cache).
    pub fn profile_subject(&mut self) -> Option<Subject> {
        let subject = token_subject(self.token()?.as_str())?;
        let cached = self.store.get(&self.keys.profile);
        match read_cached(cached.as_deref(), &subject) {
            Some(profile) => {
                self.display_name = Some(profile.name);
                None
            }
            None => Some(subject),
        }
    }

    /// Applies the outcome of a profile lookup for `subject`.
    ///
    /// Results for a subject that no longer matches the stored token are
    /// discarded. Returns `true` when the display name changed.
    pub fn complete_profile_lookup(
        &mut self,
        subject: &Subject,
        result: Result<Option<UserProfile>, SessionError>,
        notifier: &mut impl Notifier,
    ) -> bool {
        let current = self
            .token()
            .and_then(|token| token_subject(token.as_str()));
        if current.as_ref() != Some(subject) {
            tracing::debug!("discarding profile for stale subject {subject}");
            return false;
        }

        match result {
            Ok(Some(profile)) => {
                match encode_cached(subject, &profile) {
                    Ok(raw) => {
                        let key = self.keys.profile.clone();
                        self.write(&key, Some(&raw));
                    }
                    Err(err) => tracing::warn!("failed to encode cached profile: {err}"),
                }
                self.display_name = Some(profile.name);
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::debug!("profile lookup failed: {err}");
                notifier.notify(
                    NotificationRequest::warn("Could not load profile").with_cause(Cause::Network),
                );
                false
            }
        }
    }

    /// Reacts to a key changed by another instance.
    ///
    /// A token change invalidates the cached profile and the display name
    /// and returns `true`: the caller re-renders the status and, when a
    /// token is present, looks the profile up again.
    pub fn on_storage_change(&mut self, change: &StorageChange) -> bool {
        if change.key != self.keys.token {
            return false;
        }
        let key = self.keys.profile.clone();
        self.write(&key, None);
        self.display_name = None;
        true
    }

    /// Stores or clears the acting user id.
    pub fn set_acting_user(&mut self, value: &str, notifier: &mut impl Notifier) {
        let value = value.trim();
        let key = self.keys.acting_user.clone();
        if value.is_empty() {
            self.write(&key, None);
        } else {
            self.write(&key, Some(value));
        }
        let shown = if value.is_empty() { "(none)" } else { value };
        notifier.notify(NotificationRequest::info(format!(
            "Acting user id set to: {shown}"
        )));
    }

    fn write(&mut self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        };
        if let Err(err) = result {
            tracing::warn!("failed to update session key {key}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{NotificationId, Severity};
    use crate::infrastructure::storage::MemoryStore;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    #[derive(Default)]
    struct Recorder(Vec<NotificationRequest>);

    impl Notifier for Recorder {
        fn notify(&mut self, request: NotificationRequest) -> Option<NotificationId> {
            self.0.push(request);
            Some(NotificationId::new(self.0.len() as u64))
        }
    }

    fn jwt(sub: &str) -> AccessToken {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{sub}"}}"#));
        AccessToken::new(format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")).expect("non-empty token")
    }

    fn session() -> AuthSession<MemoryStore> {
        AuthSession::new(MemoryStore::new(), SessionKeys::default())
    }

    #[test]
    fn empty_user_id_warns_and_sends_nothing() {
        let session = session();
        let mut notes = Recorder::default();
        assert!(session.begin_login("   ", "pw", &mut notes).is_none());
        assert_eq!(notes.0.len(), 1);
        assert_eq!(notes.0[0].severity(), Severity::Warn);
        assert_eq!(notes.0[0].message(), "Enter user id");
    }

    #[test]
    fn empty_password_is_sent_as_absent() {
        let session = session();
        let attempt = session
            .begin_login(" alice ", "", &mut Recorder::default())
            .expect("valid attempt");
        assert_eq!(attempt.user_id, "alice");
        assert_eq!(attempt.password, None);
    }

    #[test]
    fn rejected_login_stores_nothing_and_reports_once() {
        let mut session = session();
        let mut notes = Recorder::default();
        let next = session.complete_login(
            Err(SessionError::Rejected {
                detail: "bad credentials".to_string(),
            }),
            &mut notes,
        );
        assert!(next.is_none());
        assert!(!session.is_authenticated());
        assert_eq!(notes.0.len(), 1);
        assert_eq!(notes.0[0].severity(), Severity::Error);
        assert_eq!(notes.0[0].message(), "Login failed: bad credentials");
    }

    #[test]
    fn transport_failure_reports_generic_message() {
        let mut session = session();
        let mut notes = Recorder::default();
        session.complete_login(
            Err(SessionError::Transport("refused".to_string())),
            &mut notes,
        );
        assert_eq!(notes.0[0].message(), "Login failed");
    }

    #[test]
    fn successful_login_stores_token_and_asks_for_profile() {
        let mut session = session();
        let mut notes = Recorder::default();
        let subject = session.complete_login(Ok(jwt("42")), &mut notes);
        assert_eq!(subject, Subject::new("42"));
        assert!(session.is_authenticated());
        assert_eq!(notes.0[0].severity(), Severity::Success);
        assert_eq!(notes.0[0].message(), "Logged in");
        let header = session.auth_header().expect("signed in");
        assert_eq!(header.0, "Authorization");
        assert!(header.1.starts_with("Bearer "));
    }

    #[test]
    fn cached_profile_skips_lookup() {
        let mut store = MemoryStore::new();
        store
            .set("authProfile", r#"{"sub":"42","name":"Ada Lovelace"}"#)
            .expect("memory store never fails");
        let mut session = AuthSession::new(store, SessionKeys::default());
        let next = session.complete_login(Ok(jwt("42")), &mut Recorder::default());
        assert!(next.is_none());
        assert_eq!(session.display_name(), Some("Ada Lovelace"));
    }

    #[test]
    fn profile_lookup_result_is_cached() {
        let mut session = session();
        let mut notes = Recorder::default();
        let subject = session
            .complete_login(Ok(jwt("7")), &mut notes)
            .expect("no cache yet");
        let profile = UserProfile::new("Grace Hopper");
        assert!(session.complete_profile_lookup(&subject, Ok(profile), &mut notes));
        assert_eq!(
            session.snapshot(),
            AuthSnapshot::signed_in(Some("Grace Hopper".to_string()))
        );
        assert!(session.store().get("authProfile").is_some());
        // A second resolution is served from the cache.
        assert!(session.profile_subject().is_none());
    }

    #[test]
    fn profile_lookup_failure_warns_once() {
        let mut session = session();
        let mut notes = Recorder::default();
        let subject = session
            .complete_login(Ok(jwt("7")), &mut notes)
            .expect("no cache yet");
        let changed = session.complete_profile_lookup(
            &subject,
            Err(SessionError::Transport("timeout".to_string())),
            &mut notes,
        );
        assert!(!changed);
        assert_eq!(notes.0.len(), 2);
        assert_eq!(notes.0[1].severity(), Severity::Warn);
    }

    #[test]
    fn stale_profile_results_are_discarded() {
        let mut session = session();
        let mut notes = Recorder::default();
        session.complete_login(Ok(jwt("1")), &mut notes);
        let stale = Subject::new("2").expect("non-empty");
        let changed =
            session.complete_profile_lookup(&stale, Ok(UserProfile::new("Bob")), &mut notes);
        assert!(!changed);
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn logout_clears_everything() {
        let mut session = session();
        let mut notes = Recorder::default();
        let subject = session
            .complete_login(Ok(jwt("3")), &mut notes)
            .expect("no cache yet");
        session.complete_profile_lookup(&subject, Ok(UserProfile::new("Ada")), &mut notes);

        session.logout(&mut notes);
        assert_eq!(session.snapshot(), AuthSnapshot::signed_out());
        assert!(session.store().get("authProfile").is_none());
        assert_eq!(notes.0.last().map(NotificationRequest::message), Some("Logged out"));
    }

    #[test]
    fn token_change_elsewhere_invalidates_profile() {
        let mut session = session();
        let mut notes = Recorder::default();
        let subject = session
            .complete_login(Ok(jwt("3")), &mut notes)
            .expect("no cache yet");
        session.complete_profile_lookup(&subject, Ok(UserProfile::new("Ada")), &mut notes);

        assert!(!session.on_storage_change(&StorageChange::new("actingUserId")));
        assert!(session.on_storage_change(&StorageChange::new("authToken")));
        assert_eq!(session.display_name(), None);
        assert!(session.store().get("authProfile").is_none());
    }

    #[test]
    fn acting_user_is_trimmed_and_announced() {
        let mut session = session();
        let mut notes = Recorder::default();
        session.set_acting_user("  17 ", &mut notes);
        assert_eq!(session.acting_user().as_deref(), Some("17"));
        session.set_acting_user("", &mut notes);
        assert_eq!(session.acting_user(), None);
        assert_eq!(notes.0[0].message(), "Acting user id set to: 17");
        assert_eq!(notes.0[1].message(), "Acting user id set to: (none)");
    }
}
