//! Authentication module for the OAuth implicit-grant session lifecycle.

mod config;
mod controller;
mod guard;
mod implicit;

pub use config::ClientConfig;
pub use controller::{AuthController, CallbackOutcome};
pub use guard::{AuthGuard, AuthStatus};
pub use implicit::{
    build_authorize_url, evaluate_callback, CallbackLocation, LoginRedirect, TokenGrant,
    ASSUMED_TOKEN_LIFETIME_SECS, CALLBACK_PATH,
};
