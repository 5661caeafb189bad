//! Fact endpoints.

use ontbo_constant::wire;
use reqwest::Method;

use crate::client::{OntboClient, QueryParams};
use crate::error::Result;
use crate::types::{Fact, ListFactsOptions, QueryResponse, QueryType};

const ROUTE_FACTS: &str = "/profiles/{profile_id}/facts";
const ROUTE_FACT: &str = "/profiles/{profile_id}/facts/{fact_id}";
const ROUTE_FACTS_QUERY: &str = "/profiles/{profile_id}/facts/query";

impl OntboClient {
    /// `GET /profiles/{profile_id}/facts`
    ///
    /// `fields` are sent once each in the given order; zero `skip_items` /
    /// `max_items` are left out and the service defaults apply.
    pub async fn list_facts(&self, profile_id: &str, options: &ListFactsOptions) -> Result<Vec<Fact>> {
        let mut url = self.endpoint(&["profiles", profile_id, "facts"])?;
        QueryParams::new()
            .with_each(wire::FIELDS, &options.fields)
            .with_count(wire::SKIP_ITEMS, options.skip_items)
            .with_count(wire::MAX_ITEMS, options.max_items)
            .apply(&mut url);
        self.call(Method::GET, ROUTE_FACTS, url).await
    }

    /// `POST /profiles/{profile_id}/facts?feedback=...&source_id=...`
    ///
    /// The service extracts facts from the free-text `feedback`.
    pub async fn add_fact(
        &self,
        profile_id: &str,
        feedback: &str,
        source_id: Option<&str>,
    ) -> Result<()> {
        let mut url = self.endpoint(&["profiles", profile_id, "facts"])?;
        QueryParams::new()
            .with(wire::FEEDBACK, feedback)
            .with_opt(wire::SOURCE_ID, source_id)
            .apply(&mut url);
        self.call_unit(Method::POST, ROUTE_FACTS, url).await
    }

    /// `GET /profiles/{profile_id}/facts/{fact_id}`
    pub async fn get_fact(&self, profile_id: &str, fact_id: &str) -> Result<Fact> {
        let url = self.endpoint(&["profiles", profile_id, "facts", fact_id])?;
        self.call(Method::GET, ROUTE_FACT, url).await
    }

    /// `DELETE /profiles/{profile_id}/facts/{fact_id}`
    pub async fn delete_fact(&self, profile_id: &str, fact_id: &str) -> Result<()> {
        let url = self.endpoint(&["profiles", profile_id, "facts", fact_id])?;
        self.call_unit(Method::DELETE, ROUTE_FACT, url).await
    }

    /// `GET /profiles/{profile_id}/facts/query?query=...&query_type=...`
    ///
    /// `query_type` is always sent; `None` means `FULL_DATA`.
    pub async fn query_facts(
        &self,
        profile_id: &str,
        query: &str,
        query_type: Option<QueryType>,
    ) -> Result<QueryResponse> {
        let mut url = self.endpoint(&["profiles", profile_id, "facts", "query"])?;
        QueryParams::new()
            .with(wire::QUERY, query)
            .with(wire::QUERY_TYPE, query_type.unwrap_or_default().as_str())
            .apply(&mut url);
        self.call(Method::GET, ROUTE_FACTS_QUERY, url).await
    }
}
