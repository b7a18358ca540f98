//! # OAuth 2.0 implicit-grant flow
//!
//! Implements the browser-redirect implicit grant against the identity provider.
//! Unlike an authorization-code flow there is no token exchange: the provider
//! returns the access token directly in the redirect URL fragment, so the whole
//! flow is two pure steps around a full-page navigation.
//!
//! ## Types
//!
//! - [`LoginRedirect`] — the authorization URL to navigate to, plus the CSRF
//!   state that was generated for it.
//! - [`CallbackLocation`] — a structured `{path, query, fragment}` view of the
//!   browser location on callback entry, decoupled from any global page object.
//! - [`TokenGrant`] — what a validated callback yields.
//! - `ImplicitClient` — a typed `oauth2::Client` alias with only the auth
//!   endpoint set; the implicit grant never exchanges a code, so no token
//!   endpoint is configured.
//!
//! ## Flow
//!
//! 1. **[`build_authorize_url`]** — builds an authorization URL with
//!    `response_type=token`, the client id, the redirect URI, a freshly
//!    generated CSRF state, and the minimal `api` scope. The caller persists
//!    the state and performs the navigation; nothing else runs in this page
//!    load.
//!
//! 2. **[`evaluate_callback`]** — called with the location of the redirect
//!    target. Token and metadata are read from the URL fragment (implicit-grant
//!    convention), with `state`/`error`/`error_description` falling back to the
//!    query string. The decision sequence is fixed: provider error, then
//!    missing token, then state mismatch, each a hard rejection; otherwise the
//!    grant is returned with the assumed two-hour lifetime (the provider sends
//!    no explicit expiry for this grant type).

use oauth2::basic::BasicClient;
use oauth2::{CsrfToken, EndpointNotSet, EndpointSet, Scope};
use url::Url;

use super::config::ClientConfig;
use crate::error::AuthError;

/// Assumed token lifetime for the implicit grant, in seconds.
pub const ASSUMED_TOKEN_LIFETIME_SECS: i64 = 2 * 60 * 60;

/// Path the provider redirects back to.
pub const CALLBACK_PATH: &str = "/auth/callback";

/// OAuth client type with the auth URL set and no token URL; the implicit
/// grant never exchanges a code.
type ImplicitClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
>;

/// The navigation target produced by login initiation.
///
/// The caller performs the actual redirect; `state` has already been handed
/// to it for persisting alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub url: Url,
    pub state: String,
}

/// Structured view of the browser location on callback entry.
///
/// `query` and `fragment` are the raw strings without their leading `?`/`#`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackLocation {
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl CallbackLocation {
    pub fn new(
        path: impl Into<String>,
        query: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
            fragment: fragment.into(),
        }
    }

    /// Whether this location is the provider redirect target.
    pub fn is_callback(&self) -> bool {
        self.path.contains(CALLBACK_PATH)
    }

    fn fragment_param(&self, key: &str) -> Option<String> {
        find_param(&self.fragment, key)
    }

    /// Fragment value for `key`, falling back to the query string.
    fn param_with_query_fallback(&self, key: &str) -> Option<String> {
        self.fragment_param(key)
            .or_else(|| find_param(&self.query, key))
    }
}

/// What a validated callback yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub instance_url: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    /// Lifetime to compute the absolute expiry from, in seconds.
    pub expires_in_secs: i64,
}

fn create_client(config: &ClientConfig) -> ImplicitClient {
    BasicClient::new(config.client_id.clone())
        .set_auth_uri(config.auth_url.clone())
        .set_redirect_uri(config.redirect_url.clone())
}

/// Build the authorization URL for the implicit grant.
///
/// Returns the URL together with the CSRF state embedded in it; the caller
/// persists the state before navigating.
pub fn build_authorize_url(config: &ClientConfig) -> (Url, CsrfToken) {
    create_client(config)
        .authorize_url(CsrfToken::new_random)
        .use_implicit_flow()
        .add_scope(Scope::new("api".to_string()))
        .url()
}

/// Evaluate a provider callback against the expected login state.
///
/// Pure function over the location: the caller supplies the stored state and
/// applies the resulting grant to its session store. Each rejection is
/// terminal and must leave no session behind.
pub fn evaluate_callback(
    location: &CallbackLocation,
    expected_state: Option<&str>,
) -> Result<TokenGrant, AuthError> {
    if let Some(code) = location.param_with_query_fallback("error") {
        let message = match location.param_with_query_fallback("error_description") {
            Some(desc) => format!("{code}: {desc}"),
            None => code,
        };
        return Err(AuthError::Provider(message));
    }

    let Some(access_token) = location.fragment_param("access_token") else {
        return Err(AuthError::MissingToken);
    };

    let state = location.param_with_query_fallback("state");
    match (state.as_deref(), expected_state) {
        (Some(got), Some(want)) if got == want => {}
        _ => return Err(AuthError::StateMismatch),
    }

    Ok(TokenGrant {
        access_token,
        instance_url: location.fragment_param("instance_url"),
        refresh_token: location.fragment_param("refresh_token"),
        scope: location.fragment_param("scope"),
        expires_in_secs: ASSUMED_TOKEN_LIFETIME_SECS,
    })
}

/// First value for `key` in a form-urlencoded parameter string.
fn find_param(params: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(params.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
