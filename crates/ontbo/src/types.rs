//! Types for Ontbo operations.
//!
//! Wire shapes returned by the service plus the option structs the client
//! turns into query strings. Fields the server may omit are `Option`, so an
//! absent value stays distinguishable from an empty one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked entity accumulating facts and scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A discrete piece of knowledge attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Unix epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// One message of a scene conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMessage {
    /// "user" or "assistant"; passed through unchecked
    pub role: String,
    pub content: String,
    /// Epoch time in seconds
    pub timestamp: f64,
}

impl SceneMessage {
    pub const ROLE_USER: &'static str = "user";
    pub const ROLE_ASSISTANT: &'static str = "assistant";

    pub fn new(role: impl Into<String>, content: impl Into<String>, timestamp: f64) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>, timestamp: f64) -> Self {
        Self::new(Self::ROLE_USER, content, timestamp)
    }

    pub fn assistant(content: impl Into<String>, timestamp: f64) -> Self {
        Self::new(Self::ROLE_ASSISTANT, content, timestamp)
    }
}

/// Progress of a profile update run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    /// "WORKING" or "IDLE" by convention
    pub status: String,
    /// 0.0 → 100.0, not clamped
    pub progress: f64,
}

impl UpdateStatus {
    pub fn working(progress: f64) -> Self {
        Self {
            status: ontbo_constant::STATUS_WORKING.to_string(),
            progress,
        }
    }

    pub fn idle() -> Self {
        Self {
            status: ontbo_constant::STATUS_IDLE.to_string(),
            progress: 100.0,
        }
    }

    pub fn is_working(&self) -> bool {
        self.status == ontbo_constant::STATUS_WORKING
    }
}

/// Synthesized answer to a natural-language query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub result: String,
}

/// Generic acknowledgment returned by creation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseWithId {
    pub id: String,
}

/// Context payload shape from the service's models.
///
/// No client method returns it yet; `build_context` answers with a
/// [`QueryResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResponse {
    pub context: String,
}

/// Server-side retrieval strategy for fact queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    /// Extensive search over all profile facts
    #[default]
    FullData,
    /// Multiple sub-queries to answer the query
    MultiHop,
    /// Single call to the facts database
    SingleHop,
    /// Embedding similarity search
    VectorSearch,
}

impl QueryType {
    pub const ALL: [QueryType; 4] = [
        QueryType::FullData,
        QueryType::MultiHop,
        QueryType::SingleHop,
        QueryType::VectorSearch,
    ];

    /// Wire name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::FullData => "FULL_DATA",
            QueryType::MultiHop => "MULTI_HOP",
            QueryType::SingleHop => "SINGLE_HOP",
            QueryType::VectorSearch => "VECTOR_SEARCH",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryType::ALL
            .into_iter()
            .find(|qt| qt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown query type: {}", s))
    }
}

/// Filters and paging for listing facts. Zero values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFactsOptions {
    /// Fields to return; one `fields` parameter per entry, order kept
    pub fields: Vec<String>,
    pub skip_items: usize,
    pub max_items: usize,
}

impl ListFactsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.skip_items = n;
        self
    }

    pub fn max(mut self, n: usize) -> Self {
        self.max_items = n;
        self
    }
}

/// Flags for appending text to a scene. Only `true` flags are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddTextOptions {
    /// Start a profile update right after storing the messages
    pub update_now: bool,
    /// Block server-side until that update finishes
    pub wait_for_result: bool,
}

impl AddTextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_now(mut self, on: bool) -> Self {
        self.update_now = on;
        self
    }

    pub fn wait_for_result(mut self, on: bool) -> Self {
        self.wait_for_result = on;
        self
    }
}
