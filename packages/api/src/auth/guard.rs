//! # Route guard state
//!
//! Session state published by [`AuthController`](super::AuthController) for
//! protected views to subscribe to. The controller owns the sender half of a
//! watch channel; each guarded view holds an [`AuthGuard`] receiver and reacts
//! to the latest [`AuthStatus`]:
//!
//! | Status | Guarded view |
//! |--------|--------------|
//! | [`AuthStatus::Unknown`] | render a loading state, trigger a session check |
//! | [`AuthStatus::Unauthenticated`] | redirect to the login view |
//! | [`AuthStatus::Authenticated`] | render the protected content |
//!
//! The guard only reports; navigation stays in the view layer.

use tokio::sync::watch;

/// Receiver half of the session status channel.
pub type AuthGuard = watch::Receiver<AuthStatus>;

/// Session state as last determined by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// No session check has completed yet.
    #[default]
    Unknown,
    /// A stored, unexpired token exists.
    Authenticated,
    /// No usable session; the user must log in again.
    Unauthenticated,
}

impl AuthStatus {
    /// Whether protected content may be rendered.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }

    /// Whether the user should be sent to the login view. `Unknown` is not a
    /// redirect: the check is still pending.
    pub fn needs_login(&self) -> bool {
        matches!(self, AuthStatus::Unauthenticated)
    }
}
