//! OAuth2 plumbing: consent URL, code exchange, token cache and the
//! authenticated transport handed to the fetcher

use crate::config::OAuthConfig;
use crate::error::{AuthError, FetchError};
use chrono::{DateTime, Utc};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl OAuthConfig {
    fn client(&self) -> Result<BasicClient, AuthError> {
        let client = BasicClient::new(
            ClientId::new(self.client_id.clone()),
            self.client_secret.clone().map(ClientSecret::new),
            AuthUrl::new(self.auth_uri.clone())?,
            Some(TokenUrl::new(self.token_uri.clone())?),
        )
        .set_redirect_uri(RedirectUrl::new(self.redirect_url.clone())?);

        Ok(client)
    }

    /// Consent page URL asking for offline access to the configured scopes
    pub fn authorize_url(&self, state: &str) -> Result<Url, AuthError> {
        let state = state.to_string();
        let (url, _) = self
            .client()?
            .authorize_url(move || CsrfToken::new(state))
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .add_extra_param("access_type", "offline")
            .url();

        Ok(url)
    }

    /// Exchange an authorization code for a token
    pub async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        let response = self
            .client()?
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let expiry = response
            .expires_in()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        debug!("Exchanged authorization code, token expires at {expiry:?}");

        Ok(Token {
            access_token: response.access_token().secret().clone(),
            token_type: "Bearer".to_string(),
            refresh_token: response.refresh_token().map(|t| t.secret().clone()),
            expiry,
        })
    }
}

/// An OAuth2 access token, cacheable as JSON
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,

    #[serde(default = "default_token_type")]
    pub token_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// Bearer token with no expiry information
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            refresh_token: None,
            expiry: None,
        }
    }

    /// Whether the token is past its expiry. Tokens without one never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= Utc::now())
    }

    /// Read a cached token
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| AuthError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Cache the token, readable by the owner only on unix
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AuthError> {
        let path = path.as_ref();
        let io_err = |source| AuthError::Io {
            path: path.display().to_string(),
            source,
        };

        let json = serde_json::to_vec_pretty(self)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;

        debug!("Saved token to {}", path.display());
        Ok(())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// HTTP client that attaches the bearer token to every request
#[derive(Debug, Clone)]
pub struct AuthorizedTransport {
    client: reqwest::Client,
    token: Token,
}

impl AuthorizedTransport {
    /// Build a transport with its own HTTP client
    pub fn new(token: Token) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;

        Ok(Self::with_client(client, token))
    }

    /// Reuse an existing HTTP client
    #[must_use]
    pub const fn with_client(client: reqwest::Client, token: Token) -> Self {
        Self { client, token }
    }

    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.token
    }

    /// Authenticated GET request
    #[must_use]
    pub fn get(&self, url: Url) -> reqwest::RequestBuilder {
        self.client.get(url).bearer_auth(&self.token.access_token)
    }
}
