//! Configuration for the Ontbo client.
//!
//! One base URL and one bearer token, fixed when the client is built.

use std::time::Duration;

use crate::error::{OntboError, Result};

/// Configuration for connecting to the Ontbo service.
#[derive(Clone)]
pub struct OntboConfig {
    /// Service base URL (e.g. "https://api.example.com/v1")
    pub base_url: String,
    /// Bearer token sent as `Authorization: Bearer <token>`
    pub api_token: String,
    /// Transport-level request timeout; `None` leaves reqwest's default
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for OntboConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntboConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OntboConfig {
    /// Create a new config with all required fields.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            timeout: None,
        }
    }

    /// Create config from environment variables.
    ///
    /// Required: `ONTBO_API_TOKEN`
    /// Optional: `ONTBO_BASE_URL` (default: http://127.0.0.1:8000)
    /// Optional: `ONTBO_TIMEOUT_SECS` (positive integer)
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var(ontbo_constant::ENV_API_TOKEN)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                OntboError::Config(format!("{} not set", ontbo_constant::ENV_API_TOKEN))
            })?;

        let base_url = std::env::var(ontbo_constant::ENV_BASE_URL)
            .unwrap_or_else(|_| ontbo_constant::DEFAULT_BASE_URL.to_string());

        let timeout = match std::env::var(ontbo_constant::ENV_TIMEOUT_SECS) {
            Ok(raw) => Some(parse_timeout_secs(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            api_token,
            timeout,
        })
    }

    /// Set a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(OntboError::Config(format!(
            "{} must be a positive integer, got '{}'",
            ontbo_constant::ENV_TIMEOUT_SECS,
            raw
        ))),
    }
}
