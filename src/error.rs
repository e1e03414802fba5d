//! Error types for inbox fetching and OAuth plumbing

use thiserror::Error;

/// Errors that can occur while talking to the mail provider
#[derive(Error, Debug)]
pub enum FetchError {
    /// The message service could not be constructed
    #[error("Failed to set up mail service: {0}")]
    Setup(String),

    /// The initial message listing failed
    #[error("Failed to list messages: {0}")]
    Listing(#[source] Box<FetchError>),

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("{context} returned HTTP {status}: {body}")]
    Status {
        status: u16,
        context: String,
        body: String,
    },

    /// The provider answered with a body we could not decode
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The unit was abandoned because the caller cancelled the fetch
    #[error("Fetch cancelled")]
    Cancelled,

    /// A unit of work panicked or was aborted
    #[error("Fetch task failed: {0}")]
    Task(String),
}

/// Errors raised while loading OAuth configuration or exchanging tokens
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Client secrets file has neither an `installed` nor a `web` section
    #[error("Client secrets contain no `installed` or `web` client")]
    MissingClient,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
}

/// Errors raised while persisting a report
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
