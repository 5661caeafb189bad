//! Context building.

use ontbo_constant::wire;
use reqwest::Method;

use crate::client::{OntboClient, QueryParams};
use crate::error::Result;
use crate::types::QueryResponse;

const ROUTE_CONTEXT: &str = "/profiles/{profile_id}/context";

impl OntboClient {
    /// `GET /profiles/{profile_id}/context?query=...`
    ///
    /// Summarizes what the profile's facts say about `query`, ready to be
    /// injected into a prompt.
    pub async fn build_context(&self, profile_id: &str, query: &str) -> Result<QueryResponse> {
        let mut url = self.endpoint(&["profiles", profile_id, "context"])?;
        QueryParams::new().with(wire::QUERY, query).apply(&mut url);
        self.call(Method::GET, ROUTE_CONTEXT, url).await
    }
}
