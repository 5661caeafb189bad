//! The `OntboApi` capability: one method per service endpoint.
//!
//! Code that talks to Ontbo should depend on `Arc<dyn OntboApi>` (or a
//! generic `A: OntboApi`) so tests can swap [`OntboClient`] for
//! [`InMemoryClient`](crate::memory::InMemoryClient).

use async_trait::async_trait;

use crate::client::OntboClient;
use crate::error::Result;
use crate::types::{
    AddTextOptions, Fact, ListFactsOptions, Profile, QueryResponse, QueryType, ResponseWithId,
    SceneMessage, UpdateStatus,
};

#[async_trait]
pub trait OntboApi: Send + Sync {
    // Profiles
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
    async fn create_profile(&self, requested_id: Option<&str>) -> Result<Profile>;
    async fn delete_profile(&self, profile_id: &str) -> Result<()>;
    async fn run_profile_update(&self, profile_id: &str) -> Result<Profile>;
    async fn stop_profile_update(&self, profile_id: &str) -> Result<Profile>;
    async fn get_profile_update_status(&self, profile_id: &str) -> Result<UpdateStatus>;

    // Facts
    async fn list_facts(&self, profile_id: &str, options: &ListFactsOptions) -> Result<Vec<Fact>>;
    async fn add_fact(&self, profile_id: &str, feedback: &str, source_id: Option<&str>)
        -> Result<()>;
    async fn get_fact(&self, profile_id: &str, fact_id: &str) -> Result<Fact>;
    async fn delete_fact(&self, profile_id: &str, fact_id: &str) -> Result<()>;
    /// `None` selects [`QueryType::FullData`].
    async fn query_facts(
        &self,
        profile_id: &str,
        query: &str,
        query_type: Option<QueryType>,
    ) -> Result<QueryResponse>;

    // Context
    async fn build_context(&self, profile_id: &str, query: &str) -> Result<QueryResponse>;

    // Scenes
    async fn list_scenes(&self, profile_id: &str) -> Result<Vec<String>>;
    async fn create_scene(&self, profile_id: &str, requested_id: Option<&str>)
        -> Result<ResponseWithId>;
    async fn delete_scene(&self, profile_id: &str, scene_id: &str) -> Result<()>;
    async fn get_text_from_scene(&self, profile_id: &str, scene_id: &str)
        -> Result<Vec<SceneMessage>>;
    async fn add_text_to_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
        messages: &[SceneMessage],
        options: AddTextOptions,
    ) -> Result<ResponseWithId>;
    async fn query_scenes(&self, profile_id: &str, query: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl OntboApi for OntboClient {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        OntboClient::list_profiles(self).await
    }

    async fn create_profile(&self, requested_id: Option<&str>) -> Result<Profile> {
        OntboClient::create_profile(self, requested_id).await
    }

    async fn delete_profile(&self, profile_id: &str) -> Result<()> {
        OntboClient::delete_profile(self, profile_id).await
    }

    async fn run_profile_update(&self, profile_id: &str) -> Result<Profile> {
        OntboClient::run_profile_update(self, profile_id).await
    }

    async fn stop_profile_update(&self, profile_id: &str) -> Result<Profile> {
        OntboClient::stop_profile_update(self, profile_id).await
    }

    async fn get_profile_update_status(&self, profile_id: &str) -> Result<UpdateStatus> {
        OntboClient::get_profile_update_status(self, profile_id).await
    }

    async fn list_facts(&self, profile_id: &str, options: &ListFactsOptions) -> Result<Vec<Fact>> {
        OntboClient::list_facts(self, profile_id, options).await
    }

    async fn add_fact(
        &self,
        profile_id: &str,
        feedback: &str,
        source_id: Option<&str>,
    ) -> Result<()> {
        OntboClient::add_fact(self, profile_id, feedback, source_id).await
    }

    async fn get_fact(&self, profile_id: &str, fact_id: &str) -> Result<Fact> {
        OntboClient::get_fact(self, profile_id, fact_id).await
    }

    async fn delete_fact(&self, profile_id: &str, fact_id: &str) -> Result<()> {
        OntboClient::delete_fact(self, profile_id, fact_id).await
    }

    async fn query_facts(
        &self,
        profile_id: &str,
        query: &str,
        query_type: Option<QueryType>,
    ) -> Result<QueryResponse> {
        OntboClient::query_facts(self, profile_id, query, query_type).await
    }

    async fn build_context(&self, profile_id: &str, query: &str) -> Result<QueryResponse> {
        OntboClient::build_context(self, profile_id, query).await
    }

    async fn list_scenes(&self, profile_id: &str) -> Result<Vec<String>> {
        OntboClient::list_scenes(self, profile_id).await
    }

    async fn create_scene(
        &self,
        profile_id: &str,
        requested_id: Option<&str>,
    ) -> Result<ResponseWithId> {
        OntboClient::create_scene(self, profile_id, requested_id).await
    }

    async fn delete_scene(&self, profile_id: &str, scene_id: &str) -> Result<()> {
        OntboClient::delete_scene(self, profile_id, scene_id).await
    }

    async fn get_text_from_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
    ) -> Result<Vec<SceneMessage>> {
        OntboClient::get_text_from_scene(self, profile_id, scene_id).await
    }

    async fn add_text_to_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
        messages: &[SceneMessage],
        options: AddTextOptions,
    ) -> Result<ResponseWithId> {
        OntboClient::add_text_to_scene(self, profile_id, scene_id, messages, options).await
    }

    async fn query_scenes(&self, profile_id: &str, query: &str) -> Result<Vec<String>> {
        OntboClient::query_scenes(self, profile_id, query).await
    }
}
