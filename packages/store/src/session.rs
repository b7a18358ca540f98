//! # SessionStore — the authentication session over an abstract key-value store
//!
//! This module is the core of memopad's persistence layer. [`SessionStore`] keeps the
//! current OAuth session (bearer token, instance URL, expiry) in a durable string
//! key-value store without depending on any particular storage mechanism. All reads
//! and writes go through the [`KeyValueStore`] trait, so the same logic works against
//! an in-memory store (tests), a file-per-key store (desktop), or the browser's
//! `localStorage` (web).
//!
//! ## [`KeyValueStore`] trait
//!
//! A synchronous interface with three methods — `get`/`set` for string values under
//! string keys, and `remove`. It is synchronous on purpose: the browser storage it
//! models is synchronous, and every backend here can satisfy that contract.
//! Implementations live in sibling modules ([`crate::memory`], [`crate::file_store`],
//! [`crate::web`]).
//!
//! ## Session record
//!
//! | Key | Value |
//! |-----|-------|
//! | [`ACCESS_TOKEN_KEY`] | bearer credential, present only while authenticated |
//! | [`INSTANCE_URL_KEY`] | base URL the token is valid against (optional) |
//! | [`REFRESH_TOKEN_KEY`] | stored when the provider returns one; no refresh flow |
//! | [`TOKEN_EXPIRES_AT_KEY`] | absolute expiry instant, epoch milliseconds |
//! | [`TOKEN_SCOPE_KEY`] | granted scope, informational only |
//!
//! A session is either absent or fully populated with token and expiry; an expired
//! record is treated as absent and purged in its entirety. [`SessionStore::clear`]
//! removes every session key so no reader observes a partially-cleared record.
//!
//! ## Sibling keys
//!
//! Two non-session values share the store: the one-time CSRF login state
//! ([`OAUTH_STATE_KEY`], written at login initiation and consumed exactly once at
//! callback time via [`SessionStore::take_login_state`]) and the user's language
//! preference ([`LANGUAGE_KEY`]).
//!
//! ## Timestamps
//!
//! [`now_millis`] is platform-aware: it uses `js_sys::Date::now()` on WASM and
//! `std::time::SystemTime` on native, so expiry math behaves the same in both
//! environments.

use serde::{Deserialize, Serialize};

/// Key for the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "memopad_access_token";
/// Key for the instance URL the token is valid against.
pub const INSTANCE_URL_KEY: &str = "memopad_instance_url";
/// Key for the refresh token (stored only, never exchanged).
pub const REFRESH_TOKEN_KEY: &str = "memopad_refresh_token";
/// Key for the absolute expiry instant in epoch milliseconds.
pub const TOKEN_EXPIRES_AT_KEY: &str = "memopad_token_expires_at";
/// Key for the granted OAuth scope.
pub const TOKEN_SCOPE_KEY: &str = "memopad_token_scope";
/// Key for the one-time CSRF login state.
pub const OAUTH_STATE_KEY: &str = "memopad_oauth_state";
/// Key for the user's language preference.
pub const LANGUAGE_KEY: &str = "memopad_language";

/// Synchronous trait for storing and retrieving string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Snapshot of a fully-established session, for display layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub access_token: String,
    pub instance_url: Option<String>,
    pub refresh_token: Option<String>,
    /// Absolute expiry instant, epoch milliseconds.
    pub expires_at: i64,
    pub scope: Option<String>,
}

/// The authentication session backed by a KeyValueStore.
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a newly-granted session.
    ///
    /// The access token is always written and the instance URL is overwritten on
    /// every save (removed when absent, so a stale value never outlives the token
    /// it belonged to). The refresh token is kept only when the provider returned
    /// one; a missing value leaves any previously stored token in place. When
    /// `expires_in_secs` is given, the absolute expiry is computed from the
    /// current time and persisted.
    pub fn save(
        &self,
        access_token: &str,
        instance_url: Option<&str>,
        refresh_token: Option<&str>,
        expires_in_secs: Option<i64>,
    ) {
        self.store.set(ACCESS_TOKEN_KEY, access_token);

        match instance_url {
            Some(url) => self.store.set(INSTANCE_URL_KEY, url),
            None => self.store.remove(INSTANCE_URL_KEY),
        }

        if let Some(token) = refresh_token {
            self.store.set(REFRESH_TOKEN_KEY, token);
        }

        if let Some(secs) = expires_in_secs {
            let expires_at = now_millis() + secs * 1000;
            self.store.set(TOKEN_EXPIRES_AT_KEY, &expires_at.to_string());
        }
    }

    /// Whether a session exists and has not expired.
    ///
    /// False when the token or expiry is absent (or the expiry is unreadable),
    /// otherwise true while the current time is before the expiry instant.
    pub fn is_valid(&self) -> bool {
        if self.store.get(ACCESS_TOKEN_KEY).is_none() {
            return false;
        }
        let Some(expires_at) = self.expires_at() else {
            return false;
        };
        now_millis() < expires_at
    }

    /// Remove every session key. No reader observes a partially-cleared record.
    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(INSTANCE_URL_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(TOKEN_EXPIRES_AT_KEY);
        self.store.remove(TOKEN_SCOPE_KEY);
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    pub fn instance_url(&self) -> Option<String> {
        self.store.get(INSTANCE_URL_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// Absolute expiry instant in epoch milliseconds, if stored and readable.
    pub fn expires_at(&self) -> Option<i64> {
        self.store.get(TOKEN_EXPIRES_AT_KEY)?.parse().ok()
    }

    pub fn scope(&self) -> Option<String> {
        self.store.get(TOKEN_SCOPE_KEY)
    }

    pub fn set_scope(&self, scope: &str) {
        self.store.set(TOKEN_SCOPE_KEY, scope);
    }

    /// Whole-record view, present only once token and expiry are both stored.
    pub fn snapshot(&self) -> Option<SessionRecord> {
        let access_token = self.access_token()?;
        let expires_at = self.expires_at()?;
        Some(SessionRecord {
            access_token,
            instance_url: self.instance_url(),
            refresh_token: self.refresh_token(),
            expires_at,
            scope: self.scope(),
        })
    }

    /// Store the CSRF login state, overwriting any prior value.
    pub fn set_login_state(&self, state: &str) {
        self.store.set(OAUTH_STATE_KEY, state);
    }

    /// Read and delete the CSRF login state in one step; a second call
    /// returns `None`.
    pub fn take_login_state(&self) -> Option<String> {
        let state = self.store.get(OAUTH_STATE_KEY)?;
        self.store.remove(OAUTH_STATE_KEY);
        Some(state)
    }

    pub fn language(&self) -> Option<String> {
        self.store.get(LANGUAGE_KEY)
    }

    pub fn set_language(&self, language: &str) {
        self.store.set(LANGUAGE_KEY, language);
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}
