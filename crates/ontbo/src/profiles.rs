//! Profile endpoints.

use ontbo_constant::wire;
use reqwest::Method;

use crate::client::{OntboClient, QueryParams};
use crate::error::Result;
use crate::types::{Profile, UpdateStatus};

const ROUTE_PROFILES: &str = "/profiles";
const ROUTE_PROFILE: &str = "/profiles/{profile_id}";
const ROUTE_UPDATE_RUN: &str = "/profiles/{profile_id}/update/run";
const ROUTE_UPDATE_STOP: &str = "/profiles/{profile_id}/update/stop";
const ROUTE_UPDATE_STATUS: &str = "/profiles/{profile_id}/update/status";

impl OntboClient {
    /// `GET /profiles`
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let url = self.endpoint(&["profiles"])?;
        self.call(Method::GET, ROUTE_PROFILES, url).await
    }

    /// `POST /profiles?requested_id=...`
    ///
    /// Without a requested id the service picks one.
    pub async fn create_profile(&self, requested_id: Option<&str>) -> Result<Profile> {
        let mut url = self.endpoint(&["profiles"])?;
        QueryParams::new()
            .with_opt(wire::REQUESTED_ID, requested_id)
            .apply(&mut url);
        self.call(Method::POST, ROUTE_PROFILES, url).await
    }

    /// `DELETE /profiles/{profile_id}`
    pub async fn delete_profile(&self, profile_id: &str) -> Result<()> {
        let url = self.endpoint(&["profiles", profile_id])?;
        self.call_unit(Method::DELETE, ROUTE_PROFILE, url).await
    }

    /// `PUT /profiles/{profile_id}/update/run`
    ///
    /// Starts digesting the profile's pending scenes into facts.
    pub async fn run_profile_update(&self, profile_id: &str) -> Result<Profile> {
        let url = self.endpoint(&["profiles", profile_id, "update", "run"])?;
        self.call(Method::PUT, ROUTE_UPDATE_RUN, url).await
    }

    /// `PUT /profiles/{profile_id}/update/stop`
    pub async fn stop_profile_update(&self, profile_id: &str) -> Result<Profile> {
        let url = self.endpoint(&["profiles", profile_id, "update", "stop"])?;
        self.call(Method::PUT, ROUTE_UPDATE_STOP, url).await
    }

    /// `GET /profiles/{profile_id}/update/status`
    pub async fn get_profile_update_status(&self, profile_id: &str) -> Result<UpdateStatus> {
        let url = self.endpoint(&["profiles", profile_id, "update", "status"])?;
        self.call(Method::GET, ROUTE_UPDATE_STATUS, url).await
    }
}
