//! Error types for the client core.

use thiserror::Error;

use crate::models::MAX_BODY_LEN;

/// Errors raised while establishing a session.
///
/// Every variant is terminal for the page load that produced it: the session
/// is left cleared and no retry or automatic redirect happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Required environment configuration is missing or malformed. Blocks
    /// login before any redirect.
    #[error("configuration error: {0}")]
    Config(String),
    /// The identity provider redirected back with an explicit error.
    #[error("provider error: {0}")]
    Provider(String),
    /// The callback fragment carried no access token.
    #[error("no access token in callback")]
    MissingToken,
    /// The callback state did not byte-for-byte match the stored login state.
    #[error("login state mismatch")]
    StateMismatch,
}

/// Errors from memo calls against the storage API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, timeout, or body decode.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The response envelope reported failure; carries the server message
    /// when one was provided.
    #[error("{0}")]
    Api(String),
    /// The storage API rejected the bearer token. The session has already
    /// been cleared when this is returned.
    #[error("session rejected by the storage API")]
    Unauthorized,
    /// The draft failed local validation; no request was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Local form-constraint violations. Never sent to the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    TitleEmpty,
    #[error("body must not be empty")]
    BodyEmpty,
    #[error("body exceeds {} characters (got {len})", MAX_BODY_LEN)]
    BodyTooLong { len: usize },
}
