//! Scene endpoints.
//!
//! A scene is an ordered conversation attached to a profile. Messages are
//! appended in the order given and read back in that order.

use ontbo_constant::wire;
use reqwest::Method;

use crate::client::{OntboClient, QueryParams};
use crate::error::Result;
use crate::types::{AddTextOptions, ResponseWithId, SceneMessage};

const ROUTE_SCENES: &str = "/profiles/{profile_id}/scenes";
const ROUTE_SCENE: &str = "/profiles/{profile_id}/scenes/{scene_id}";
const ROUTE_SCENE_TEXT: &str = "/profiles/{profile_id}/scenes/{scene_id}/text";
const ROUTE_SCENES_QUERY: &str = "/profiles/{profile_id}/scenes/query";

impl OntboClient {
    /// `GET /profiles/{profile_id}/scenes`
    ///
    /// Returns scene identifiers.
    pub async fn list_scenes(&self, profile_id: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&["profiles", profile_id, "scenes"])?;
        self.call(Method::GET, ROUTE_SCENES, url).await
    }

    /// `POST /profiles/{profile_id}/scenes?requested_id=...`
    pub async fn create_scene(
        &self,
        profile_id: &str,
        requested_id: Option<&str>,
    ) -> Result<ResponseWithId> {
        let mut url = self.endpoint(&["profiles", profile_id, "scenes"])?;
        QueryParams::new()
            .with_opt(wire::REQUESTED_ID, requested_id)
            .apply(&mut url);
        self.call(Method::POST, ROUTE_SCENES, url).await
    }

    /// `DELETE /profiles/{profile_id}/scenes/{scene_id}`
    pub async fn delete_scene(&self, profile_id: &str, scene_id: &str) -> Result<()> {
        let url = self.endpoint(&["profiles", profile_id, "scenes", scene_id])?;
        self.call_unit(Method::DELETE, ROUTE_SCENE, url).await
    }

    /// `GET /profiles/{profile_id}/scenes/{scene_id}/text`
    pub async fn get_text_from_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
    ) -> Result<Vec<SceneMessage>> {
        let url = self.endpoint(&["profiles", profile_id, "scenes", scene_id, "text"])?;
        self.call(Method::GET, ROUTE_SCENE_TEXT, url).await
    }

    /// `POST /profiles/{profile_id}/scenes/{scene_id}/text`
    ///
    /// Body is the JSON array of `messages`. `update_now` / `wait_for_result`
    /// are only put on the query string when set.
    pub async fn add_text_to_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
        messages: &[SceneMessage],
        options: AddTextOptions,
    ) -> Result<ResponseWithId> {
        let mut url = self.endpoint(&["profiles", profile_id, "scenes", scene_id, "text"])?;
        QueryParams::new()
            .with_flag(wire::UPDATE_NOW, options.update_now)
            .with_flag(wire::WAIT_FOR_RESULT, options.wait_for_result)
            .apply(&mut url);
        self.call_with_json(Method::POST, ROUTE_SCENE_TEXT, url, messages)
            .await
    }

    /// `GET /profiles/{profile_id}/scenes/query?query=...`
    ///
    /// Returns the ids of matching scenes.
    pub async fn query_scenes(&self, profile_id: &str, query: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["profiles", profile_id, "scenes", "query"])?;
        QueryParams::new().with(wire::QUERY, query).apply(&mut url);
        self.call(Method::GET, ROUTE_SCENES_QUERY, url).await
    }
}
