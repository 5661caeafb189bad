//! Error types for Ontbo operations.

use thiserror::Error;

/// Errors that can occur when talking to the Ontbo service.
#[derive(Error, Debug)]
pub enum OntboError {
    /// Configuration error (missing env vars, invalid base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, DNS or TLS failure; the request never completed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx body that is not the expected JSON shape
    #[error("Malformed response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// An identifier that cannot be sent as a single path segment
    #[error("Invalid identifier '{0}': must be non-empty and not '.' or '..'")]
    InvalidId(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OntboError {
    /// Build an API error from a status code and body text.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, when one was read.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for Ontbo operations.
pub type Result<T> = std::result::Result<T, OntboError>;
