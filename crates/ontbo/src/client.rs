//! Ontbo HTTP client and the request plumbing its endpoint methods share.
//!
//! Endpoint methods live next to their resource (`profiles`, `facts`,
//! `scenes`, `context`); this module holds what they share.

use std::time::Instant;

use ontbo_observability::{api_request_span, record_duration, record_error, record_status};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn, Instrument};

use crate::config::OntboConfig;
use crate::error::{OntboError, Result};

/// Ontbo client bound to one base URL and one bearer token.
///
/// Cheap to clone; clones share the underlying connection pool, so one
/// instance can serve concurrent callers.
#[derive(Clone)]
pub struct OntboClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl std::fmt::Debug for OntboClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntboClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl OntboClient {
    /// Create a client for `base_url` authenticating with `token`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::from_config(OntboConfig::new(base_url, token))
    }

    /// Create a client from `ONTBO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(OntboConfig::from_env()?)
    }

    /// Create a client with its own transport built from `config`.
    pub fn from_config(config: OntboConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| OntboError::Config(format!("failed to build HTTP client: {}", e)))?;
        Self::with_http_client(http, config)
    }

    /// Create a client over an existing transport. `config.timeout` is
    /// ignored here; configure it on `http` instead.
    pub fn with_http_client(http: reqwest::Client, config: OntboConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        Ok(Self {
            http,
            base_url,
            token: config.api_token,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended with one percent-encoded path segment per entry.
    ///
    /// Empty, `.` and `..` segments are rejected with
    /// [`OntboError::InvalidId`]: URL normalization collapses dot segments
    /// even when percent-encoded, so they would address another resource.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(OntboError::InvalidId(bad.to_string()));
        }
        let mut url = self.base_url.clone();
        // parse_base_url rejected cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// Non-2xx responses become [`OntboError::Api`] with the full body.
    async fn send(
        &self,
        method: Method,
        route: &'static str,
        url: Url,
        json_body: Option<Vec<u8>>,
    ) -> Result<String> {
        let span = api_request_span!(method.as_str(), route);
        async move {
            let started = Instant::now();
            let mut request = self.http.request(method, url).bearer_auth(&self.token);
            if let Some(body) = json_body {
                request = request.header(CONTENT_TYPE, "application/json").body(body);
            }

            debug!("Sending request");
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    record_error(&e);
                    return Err(OntboError::Transport(e));
                }
            };

            let status = response.status();
            record_status(status.as_u16());
            let body = response.text().await?;
            record_duration("duration_ms", started.elapsed());

            if !status.is_success() {
                warn!(status = status.as_u16(), "Ontbo API returned an error");
                return Err(OntboError::api(status.as_u16(), body));
            }

            debug!(status = status.as_u16(), bytes = body.len(), "Request succeeded");
            Ok(body)
        }
        .instrument(span)
        .await
    }

    /// Request without a body, decoding the JSON response into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        route: &'static str,
        url: Url,
    ) -> Result<T> {
        let body = self.send(method, route, url, None).await?;
        decode(body)
    }

    /// Request without a body whose response carries nothing of interest.
    pub(crate) async fn call_unit(&self, method: Method, route: &'static str, url: Url) -> Result<()> {
        self.send(method, route, url, None).await?;
        Ok(())
    }

    /// Request with a JSON body, decoding the JSON response into `T`.
    pub(crate) async fn call_with_json<B, T>(
        &self,
        method: Method,
        route: &'static str,
        url: Url,
        payload: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let encoded = serde_json::to_vec(payload)?;
        let body = self.send(method, route, url, Some(encoded)).await?;
        decode(body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| OntboError::Config(format!("invalid base URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(OntboError::Config(format!(
            "base URL '{}' cannot carry a path",
            raw
        )));
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T> {
    serde_json::from_str(&body).map_err(|source| OntboError::Decode { source, body })
}

/// Query string under construction. Parameters holding their default value
/// are dropped so the wire only carries what the caller set.
#[derive(Debug, Default)]
pub(crate) struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Always sent, even when empty.
    pub(crate) fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// Sent when present and non-empty.
    pub(crate) fn with_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.with(key, v),
            _ => self,
        }
    }

    /// Sent as `true` when set, omitted otherwise.
    pub(crate) fn with_flag(self, key: &'static str, on: bool) -> Self {
        if on {
            self.with(key, "true")
        } else {
            self
        }
    }

    /// Sent when greater than zero.
    pub(crate) fn with_count(self, key: &'static str, n: usize) -> Self {
        if n > 0 {
            self.with(key, n.to_string())
        } else {
            self
        }
    }

    /// One pair per value, order kept.
    pub(crate) fn with_each(mut self, key: &'static str, values: &[String]) -> Self {
        for value in values {
            self.pairs.push((key, value.clone()));
        }
        self
    }

    pub(crate) fn apply(self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
    }
}
