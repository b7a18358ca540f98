//! # MemoClient — the typed memo REST client
//!
//! CRUD against the storage API's memo endpoints, with the session store as
//! the single source of routing and credentials. Base URL and bearer token
//! are read from the store on every call, so a login or logout between calls
//! is picked up without rebuilding the client.
//!
//! ## Endpoints
//!
//! | Operation | Method and path |
//! |-----------|-----------------|
//! | [`list`](MemoClient::list) | `GET /api/memo` |
//! | [`get`](MemoClient::get) | `GET /api/memo/update/{id}` |
//! | [`create`](MemoClient::create) | `POST /api/memo` |
//! | [`update`](MemoClient::update) | `PATCH /api/memo/update/{id}` |
//! | [`delete`](MemoClient::delete) | `DELETE /api/memo/{id}` |
//!
//! Paths are appended to `{instance_url}/services/apexrest`, falling back to
//! the configured API base URL while no instance URL is stored.
//!
//! ## Response handling
//!
//! Every body is the `{success, data, message}` envelope, decoded and checked
//! independently of the HTTP status. The exception is a `401` or `403`
//! status: the storage API rejected the bearer token, so the session is
//! cleared before [`ApiError::Unauthorized`] is returned and the next session
//! check sends the user back to login.
//!
//! In-flight requests are cancelled by dropping the returned future.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use store::{KeyValueStore, SessionStore};
use tracing::{debug, warn};
use url::Url;

use crate::auth::ClientConfig;
use crate::error::ApiError;
use crate::models::{ApiResponse, Memo, MemoDraft};

/// Typed client for the memo endpoints.
pub struct MemoClient<S: KeyValueStore> {
    http: reqwest::Client,
    fallback_base: Url,
    sessions: SessionStore<S>,
}

impl<S: KeyValueStore> MemoClient<S> {
    /// Create a client over the same key-value store the auth side uses.
    pub fn new(config: &ClientConfig, store: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            fallback_base: config.api_base_url.clone(),
            sessions: SessionStore::new(store),
        }
    }

    /// Fetch every memo visible to the session, newest first.
    pub async fn list(&self) -> Result<Vec<Memo>, ApiError> {
        let url = self.endpoint("/api/memo");
        debug!("listing memos from {url}");
        let response = self.authorize(self.http.get(&url)).send().await?;
        self.read_envelope::<Vec<Memo>>(response).await?.into_result()
    }

    /// Fetch one memo for editing.
    pub async fn get(&self, id: &str) -> Result<Memo, ApiError> {
        let url = self.endpoint(&format!("/api/memo/update/{id}"));
        let response = self.authorize(self.http.get(&url)).send().await?;
        self.read_envelope::<Memo>(response).await?.into_result()
    }

    /// Create a memo from a draft. Local validation runs first; an invalid
    /// draft returns [`ApiError::Invalid`] without sending anything.
    pub async fn create(&self, draft: &MemoDraft) -> Result<Memo, ApiError> {
        draft.validate()?;
        let url = self.endpoint("/api/memo");
        debug!("creating memo at {url}");
        let response = self
            .authorize(self.http.post(&url))
            .json(draft)
            .send()
            .await?;
        self.read_envelope::<Memo>(response).await?.into_result()
    }

    /// Update an existing memo in place. Validates like [`create`](Self::create).
    pub async fn update(&self, id: &str, draft: &MemoDraft) -> Result<Memo, ApiError> {
        draft.validate()?;
        let url = self.endpoint(&format!("/api/memo/update/{id}"));
        debug!("updating memo at {url}");
        let response = self
            .authorize(self.http.patch(&url))
            .json(draft)
            .send()
            .await?;
        self.read_envelope::<Memo>(response).await?.into_result()
    }

    /// Delete a memo. The success envelope carries no payload.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/memo/{id}"));
        let response = self.authorize(self.http.delete(&url)).send().await?;
        self.read_envelope::<()>(response).await?.into_ack()
    }

    /// Connectivity probe: a full list call, reporting how many memos the
    /// session can see.
    pub async fn test_connection(&self) -> Result<usize, ApiError> {
        Ok(self.list().await?.len())
    }

    fn endpoint(&self, path: &str) -> String {
        let base = derive_base(self.sessions.instance_url().as_deref(), &self.fallback_base);
        format!("{base}{path}")
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.sessions.access_token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Decode the response envelope, handling token rejection first.
    async fn read_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        if session_rejected(response.status()) {
            self.sessions.clear();
            warn!(
                "bearer token rejected ({}), session cleared",
                response.status()
            );
            return Err(ApiError::Unauthorized);
        }
        Ok(response.json().await?)
    }
}

/// Base URL for memo calls: the stored instance URL with the REST path
/// appended, or the configured fallback before any login has stored one.
/// String concatenation on purpose; the REST path must extend whatever path
/// the base already carries.
fn derive_base(instance_url: Option<&str>, fallback: &Url) -> String {
    match instance_url {
        Some(url) => format!("{}/services/apexrest", url.trim_end_matches('/')),
        None => fallback.as_str().trim_end_matches('/').to_string(),
    }
}

/// Whether the status means the storage API rejected the bearer token.
fn session_rejected(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}
