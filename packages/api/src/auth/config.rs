//! Client configuration from environment variables.

use oauth2::{AuthUrl, ClientId, RedirectUrl};
use url::Url;

use crate::error::AuthError;

/// Identity-provider and storage-API configuration for the memo client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_id: ClientId,
    pub auth_url: AuthUrl,
    pub redirect_url: RedirectUrl,
    /// Fallback API base, used only while no instance URL is stored.
    pub api_base_url: Url,
}

impl ClientConfig {
    /// Create the client config from environment variables.
    ///
    /// All four values are required at login time; a missing one aborts login
    /// before any redirect.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let client_id = std::env::var("MEMOPAD_CLIENT_ID")
            .map_err(|_| AuthError::Config("MEMOPAD_CLIENT_ID not set".to_string()))?;
        let redirect_uri = std::env::var("MEMOPAD_REDIRECT_URI")
            .map_err(|_| AuthError::Config("MEMOPAD_REDIRECT_URI not set".to_string()))?;
        let login_url = std::env::var("MEMOPAD_LOGIN_URL")
            .map_err(|_| AuthError::Config("MEMOPAD_LOGIN_URL not set".to_string()))?;
        let api_base_url = std::env::var("MEMOPAD_API_BASE_URL")
            .map_err(|_| AuthError::Config("MEMOPAD_API_BASE_URL not set".to_string()))?;

        Self::new(&client_id, &redirect_uri, &login_url, &api_base_url)
    }

    /// Build a config from explicit values (embedding apps, tests).
    ///
    /// `login_url` is the identity provider's base URL; the authorization
    /// endpoint lives at `{login_url}/services/oauth2/authorize`.
    pub fn new(
        client_id: &str,
        redirect_uri: &str,
        login_url: &str,
        api_base_url: &str,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            client_id: ClientId::new(client_id.to_string()),
            auth_url: AuthUrl::new(format!(
                "{}/services/oauth2/authorize",
                login_url.trim_end_matches('/')
            ))
            .map_err(|e| AuthError::Config(format!("invalid login URL: {e}")))?,
            redirect_url: RedirectUrl::new(redirect_uri.to_string())
                .map_err(|e| AuthError::Config(format!("invalid redirect URI: {e}")))?,
            api_base_url: Url::parse(api_base_url)
                .map_err(|e| AuthError::Config(format!("invalid API base URL: {e}")))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_url_appends_authorize_path() {
        let config = ClientConfig::new(
            "client-1",
            "https://app.example.com/auth/callback",
            "https://login.example.com/",
            "https://api.example.com",
        )
        .unwrap();

        assert_eq!(
            config.auth_url.as_str(),
            "https://login.example.com/services/oauth2/authorize"
        );
    }

    #[test]
    fn test_invalid_urls_are_config_errors() {
        let err =
            ClientConfig::new("c", "not a url", "https://login.example.com", "x").unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }

    #[test]
    fn test_missing_env_is_config_error() {
        std::env::remove_var("MEMOPAD_CLIENT_ID");
        let err = ClientConfig::from_env().unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }
}
