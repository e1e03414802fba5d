//! Explicitly constructed configuration values

use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Read-only Gmail scope
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:8080/callback";
pub const DEFAULT_API_BASE_URL: &str = "https://gmail.googleapis.com";
pub const DEFAULT_MAX_RESULTS: u32 = 100;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// OAuth client settings for the mail provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub auth_uri: String,
    pub token_uri: String,
    pub redirect_url: String,
    pub scopes: Vec<String>,
}

/// One client entry of a Google client-secrets file
#[derive(Debug, Deserialize)]
struct ClientSecret {
    client_id: String,
    #[serde(default)]
    client_secret: Option<String>,
    auth_uri: String,
    token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl OAuthConfig {
    /// Parse a Google client-secrets document
    ///
    /// The `installed` client wins over `web` when both are present. The
    /// redirect URL and scopes take their defaults.
    pub fn from_client_secrets(json: &str) -> Result<Self, AuthError> {
        let file: ClientSecretsFile = serde_json::from_str(json)?;
        let client = file
            .installed
            .or(file.web)
            .ok_or(AuthError::MissingClient)?;

        Ok(Self {
            client_id: client.client_id,
            client_secret: client.client_secret.filter(|s| !s.is_empty()),
            auth_uri: client.auth_uri,
            token_uri: client.token_uri,
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            scopes: vec![GMAIL_READONLY_SCOPE.to_string()],
        })
    }

    /// Load a Google client-secrets file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| AuthError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_client_secrets(&json)
    }

    #[must_use]
    pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = redirect_url.into();
        self
    }
}

/// Knobs for a single inbox fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Upper bound on listed messages
    pub max_results: u32,

    /// Maximum number of message retrievals in flight at once
    pub concurrency_limit: usize,

    pub api_base_url: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the concurrency cap; zero is raised to one
    #[must_use]
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
