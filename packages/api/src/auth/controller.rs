//! # AuthController — the session lifecycle
//!
//! Single owner of session mutations. Views never write session keys
//! themselves; they call into the controller, which combines the pure
//! implicit-grant functions from [`super::implicit`] with the durable
//! [`SessionStore`] and publishes every state change on a watch channel for
//! [`AuthGuard`](super::AuthGuard) subscribers.
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`begin_login`](AuthController::begin_login) | persist a fresh CSRF state, hand back the navigation target |
//! | [`complete_login`](AuthController::complete_login) | consume the state, validate the callback, establish or reject the session |
//! | [`logout`](AuthController::logout) | clear the session unconditionally |
//! | [`check_session`](AuthController::check_session) | classify the stored record, purging an expired one |
//!
//! The stored CSRF state is consumed on every terminal callback decision,
//! success or failure, so a replayed redirect URL can never establish a second
//! session.

use store::{KeyValueStore, SessionStore};
use tokio::sync::watch;
use tracing::{info, warn};

use super::config::ClientConfig;
use super::guard::{AuthGuard, AuthStatus};
use super::implicit::{build_authorize_url, evaluate_callback, CallbackLocation, LoginRedirect};
use crate::error::AuthError;

/// What [`AuthController::complete_login`] did with a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Not the provider redirect target; nothing was read or written.
    NotCallback,
    /// The grant was validated and the session persisted.
    Authenticated,
}

/// Owner of the session lifecycle and the status channel.
pub struct AuthController<S: KeyValueStore> {
    sessions: SessionStore<S>,
    status: watch::Sender<AuthStatus>,
}

impl<S: KeyValueStore> AuthController<S> {
    /// Create a controller over a key-value store. The status starts at
    /// [`AuthStatus::Unknown`] until the first [`check_session`](Self::check_session).
    pub fn new(store: S) -> Self {
        let (status, _) = watch::channel(AuthStatus::Unknown);
        Self {
            sessions: SessionStore::new(store),
            status,
        }
    }

    /// The underlying session store, for read-side consumers.
    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    /// Subscribe a guarded view to session status changes.
    pub fn guard(&self) -> AuthGuard {
        self.status.subscribe()
    }

    /// Last published status.
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// Start a login: generate the authorization URL, persist its CSRF state,
    /// and return the navigation target. The caller performs the redirect.
    pub fn begin_login(&self, config: &ClientConfig) -> LoginRedirect {
        let (url, csrf) = build_authorize_url(config);
        let state = csrf.secret().clone();
        self.sessions.set_login_state(&state);
        info!("login initiated, navigating to authorization endpoint");
        LoginRedirect { url, state }
    }

    /// Complete a login from the location the provider redirected to.
    ///
    /// A non-callback location is ignored without touching the stored state.
    /// On the callback path the state is consumed first, so the decision is
    /// terminal either way: a validated grant is saved and published as
    /// [`AuthStatus::Authenticated`]; any rejection clears the session and
    /// publishes [`AuthStatus::Unauthenticated`].
    pub fn complete_login(
        &self,
        location: &CallbackLocation,
    ) -> Result<CallbackOutcome, AuthError> {
        if !location.is_callback() {
            return Ok(CallbackOutcome::NotCallback);
        }

        let expected = self.sessions.take_login_state();
        match evaluate_callback(location, expected.as_deref()) {
            Ok(grant) => {
                self.sessions.save(
                    &grant.access_token,
                    grant.instance_url.as_deref(),
                    grant.refresh_token.as_deref(),
                    Some(grant.expires_in_secs),
                );
                if let Some(scope) = &grant.scope {
                    self.sessions.set_scope(scope);
                }
                self.status.send_replace(AuthStatus::Authenticated);
                info!("login completed, session established");
                Ok(CallbackOutcome::Authenticated)
            }
            Err(err) => {
                self.sessions.clear();
                self.status.send_replace(AuthStatus::Unauthenticated);
                warn!("login rejected: {err}");
                Err(err)
            }
        }
    }

    /// Clear the session and publish [`AuthStatus::Unauthenticated`].
    /// Idempotent; logging out twice is harmless.
    pub fn logout(&self) {
        self.sessions.clear();
        self.status.send_replace(AuthStatus::Unauthenticated);
        info!("logged out, session cleared");
    }

    /// Classify the stored session and publish the result.
    ///
    /// An absent or expired record yields [`AuthStatus::Unauthenticated`] and
    /// purges whatever was stored, so no later read sees a stale token.
    pub fn check_session(&self) -> AuthStatus {
        let status = if self.sessions.is_valid() {
            AuthStatus::Authenticated
        } else {
            self.sessions.clear();
            AuthStatus::Unauthenticated
        };
        self.status.send_replace(status);
        status
    }
}

#[cfg(test)]
mod tests {
    use store::{now_millis, MemoryStore};

    use super::*;

    fn test_config() -> ClientConfig {
        ClientConfig::new(
            "client-1",
            "https://app.example.com/auth/callback",
            "https://login.example.com",
            "https://api.example.com",
        )
        .unwrap()
    }

    fn callback_with(fragment: &str) -> CallbackLocation {
        CallbackLocation::new("/auth/callback", "", fragment)
    }

    #[test]
    fn test_begin_login_persists_the_state_in_the_url() {
        let controller = AuthController::new(MemoryStore::new());
        let redirect = controller.begin_login(&test_config());

        assert!(redirect
            .url
            .query_pairs()
            .any(|(k, v)| k == "response_type" && v == "token"));
        assert!(redirect
            .url
            .query_pairs()
            .any(|(k, v)| k == "state" && v == redirect.state));
        // The same state awaits the callback
        assert_eq!(
            controller.sessions().take_login_state().as_deref(),
            Some(redirect.state.as_str())
        );
        // Initiation alone does not change the published status
        assert_eq!(controller.status(), AuthStatus::Unknown);
    }

    #[test]
    fn test_complete_login_establishes_the_session() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().set_login_state("S");

        let before = now_millis();
        let outcome = controller
            .complete_login(&callback_with(
                "access_token=abc&state=S&instance_url=https%3A%2F%2Fx.com&scope=api",
            ))
            .unwrap();
        assert_eq!(outcome, CallbackOutcome::Authenticated);

        let sessions = controller.sessions();
        assert_eq!(sessions.access_token().as_deref(), Some("abc"));
        assert_eq!(sessions.instance_url().as_deref(), Some("https://x.com"));
        assert_eq!(sessions.scope().as_deref(), Some("api"));
        // Two-hour assumed lifetime from the moment of validation
        let expires_at = sessions.expires_at().unwrap();
        assert!(expires_at >= before + 7_200_000);
        assert!(expires_at <= now_millis() + 7_200_000);
        // State was consumed
        assert!(sessions.take_login_state().is_none());
        assert_eq!(controller.status(), AuthStatus::Authenticated);
    }

    #[test]
    fn test_state_mismatch_rejects_and_clears() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().set_login_state("S1");

        let err = controller
            .complete_login(&callback_with("access_token=abc&state=S2"))
            .unwrap_err();
        assert_eq!(err, AuthError::StateMismatch);

        assert!(controller.sessions().access_token().is_none());
        assert!(controller.sessions().take_login_state().is_none());
        assert_eq!(controller.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_provider_error_still_consumes_the_state() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().set_login_state("S");

        let err = controller
            .complete_login(&callback_with("error=access_denied"))
            .unwrap_err();
        assert_eq!(err, AuthError::Provider("access_denied".to_string()));
        assert!(controller.sessions().take_login_state().is_none());
    }

    #[test]
    fn test_non_callback_location_is_ignored() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().set_login_state("S");

        let outcome = controller
            .complete_login(&CallbackLocation::new("/memo/new", "", ""))
            .unwrap();
        assert_eq!(outcome, CallbackOutcome::NotCallback);

        // State stays put for the real callback; status is untouched
        assert_eq!(
            controller.sessions().take_login_state().as_deref(),
            Some("S")
        );
        assert_eq!(controller.status(), AuthStatus::Unknown);
    }

    #[test]
    fn test_replayed_callback_is_rejected() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().set_login_state("S");
        let location = callback_with("access_token=abc&state=S");

        controller.complete_login(&location).unwrap();
        // Same redirect URL again: the state is gone, so it cannot re-login
        let err = controller.complete_login(&location).unwrap_err();
        assert_eq!(err, AuthError::StateMismatch);
    }

    #[test]
    fn test_logout_clears_everything() {
        let controller = AuthController::new(MemoryStore::new());
        controller
            .sessions()
            .save("abc", Some("https://x.com"), None, Some(7200));

        controller.logout();

        assert!(controller.sessions().snapshot().is_none());
        assert_eq!(controller.status(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_check_session_accepts_a_live_record() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().save("abc", None, None, Some(7200));

        assert_eq!(controller.check_session(), AuthStatus::Authenticated);
        assert_eq!(controller.status(), AuthStatus::Authenticated);
    }

    #[test]
    fn test_check_session_purges_an_expired_record() {
        let controller = AuthController::new(MemoryStore::new());
        controller.sessions().save("abc", Some("https://x.com"), None, Some(-1));

        assert_eq!(controller.check_session(), AuthStatus::Unauthenticated);
        // The whole record is gone, not just classified stale
        let sessions = controller.sessions();
        assert!(sessions.access_token().is_none());
        assert!(sessions.instance_url().is_none());
        assert!(sessions.expires_at().is_none());
    }

    #[test]
    fn test_check_session_with_no_record() {
        let controller = AuthController::new(MemoryStore::new());
        assert_eq!(controller.check_session(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_guard_observes_status_transitions() {
        let controller = AuthController::new(MemoryStore::new());
        let mut guard = controller.guard();
        assert_eq!(*guard.borrow(), AuthStatus::Unknown);

        controller.check_session();
        guard.changed().await.unwrap();
        assert_eq!(*guard.borrow_and_update(), AuthStatus::Unauthenticated);

        controller.sessions().set_login_state("S");
        controller
            .complete_login(&callback_with("access_token=abc&state=S"))
            .unwrap();
        guard.changed().await.unwrap();
        assert_eq!(*guard.borrow_and_update(), AuthStatus::Authenticated);
    }
}
