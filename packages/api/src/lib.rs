//! # API crate — client core for the memopad single-page app
//!
//! Everything the memopad frontends share: the OAuth implicit-grant session
//! lifecycle, the typed memo REST client, the content pipeline between editor
//! and page, and the JST datetime helpers. Persistence is abstracted behind
//! the `store` crate's [`KeyValueStore`], so the same logic runs against the
//! browser's `localStorage`, a file-per-key store, or memory in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | login initiation, callback validation, session checks, and the watch-channel route guard |
//! | [`content`] | markup sanitizer plus display/plain-text/preview formatting |
//! | [`datetime`] | ISO-8601 instants to and from JST `datetime-local` field values |
//! | [`error`] | error taxonomy: `AuthError`, `ApiError`, `ValidationError` |
//! | [`memos`] | typed CRUD client for the storage API's memo endpoints |
//! | [`models`] | wire types: `Memo`, `MemoDraft`, the `ApiResponse` envelope |
//!
//! ## Typical wiring
//!
//! A frontend builds one [`ClientConfig`] at startup, then an
//! [`AuthController`] and a [`MemoClient`] over clones of the same store.
//! Guarded views subscribe via [`AuthController::guard`] and call
//! [`AuthController::check_session`] on entry; the callback view feeds its
//! location to [`AuthController::complete_login`].

pub mod auth;
pub mod content;
pub mod datetime;
pub mod error;
pub mod memos;
pub mod models;

pub use auth::{
    AuthController, AuthGuard, AuthStatus, CallbackLocation, CallbackOutcome, ClientConfig,
    LoginRedirect,
};
pub use error::{ApiError, AuthError, ValidationError};
pub use memos::MemoClient;
pub use models::{ApiResponse, Memo, MemoDraft};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionRecord, SessionStore};
