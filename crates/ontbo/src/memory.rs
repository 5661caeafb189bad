//! In-process `OntboApi` implementation for tests and offline development.
//!
//! Keeps profiles, facts and scenes in memory and answers with the same
//! error shapes as the service: unknown ids are `404`, duplicate requested
//! ids are `409`. Every call is recorded so tests can assert on what their
//! code asked for.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::api::OntboApi;
use crate::error::{OntboError, Result};
use crate::types::{
    AddTextOptions, Fact, ListFactsOptions, Profile, QueryResponse, QueryType, ResponseWithId,
    SceneMessage, UpdateStatus,
};

/// Query words shorter than this never match.
const MIN_TERM_LEN: usize = 3;

/// One call made against an [`InMemoryClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub args: Vec<String>,
}

struct Scene {
    id: String,
    messages: Vec<SceneMessage>,
}

struct ProfileState {
    profile: Profile,
    facts: Vec<Fact>,
    scenes: Vec<Scene>,
    update: UpdateStatus,
}

impl ProfileState {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            profile: Profile {
                id,
                created_at: Some(now),
                updated_at: Some(now),
            },
            facts: Vec::new(),
            scenes: Vec::new(),
            update: UpdateStatus::idle(),
        }
    }

    fn touch(&mut self) {
        self.profile.updated_at = Some(Utc::now());
    }

    fn scene_mut(&mut self, scene_id: &str) -> Result<&mut Scene> {
        self.scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| not_found("scene", scene_id))
    }

    fn matching_facts(&self, query: &str) -> Vec<&str> {
        let terms = terms(query);
        self.facts
            .iter()
            .filter_map(|f| f.data.as_deref())
            .filter(|data| matches_any(data, &terms))
            .collect()
    }
}

/// In-memory stand-in for [`OntboClient`](crate::OntboClient).
#[derive(Default)]
pub struct InMemoryClient {
    profiles: Mutex<Vec<ProfileState>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of recorded calls to `operation`.
    pub fn call_count(&self, operation: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn record(&self, operation: &'static str, args: &[&str]) {
        debug!(operation, "in-memory call");
        lock(&self.calls).push(RecordedCall {
            operation,
            args: args.iter().map(|a| a.to_string()).collect(),
        });
    }

    fn with_profile<T>(
        &self,
        profile_id: &str,
        f: impl FnOnce(&mut ProfileState) -> Result<T>,
    ) -> Result<T> {
        let mut profiles = lock(&self.profiles);
        let state = profiles
            .iter_mut()
            .find(|p| p.profile.id == profile_id)
            .ok_or_else(|| not_found("profile", profile_id))?;
        f(state)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn detail(status: u16, message: String) -> OntboError {
    OntboError::api(status, serde_json::json!({ "detail": message }).to_string())
}

fn not_found(kind: &str, id: &str) -> OntboError {
    detail(404, format!("{} '{}' not found", kind, id))
}

fn conflict(kind: &str, id: &str) -> OntboError {
    detail(409, format!("{} '{}' already exists", kind, id))
}

fn new_id(requested: Option<&str>) -> String {
    match requested {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => uuid::Uuid::new_v4().to_string(),
    }
}

fn terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .map(str::to_lowercase)
        .collect()
}

fn matches_any(text: &str, terms: &[String]) -> bool {
    let text = text.to_lowercase();
    terms.iter().any(|t| text.contains(t.as_str()))
}

/// Keep only the requested fields; unknown names are ignored.
fn project(fact: &Fact, fields: &[String]) -> Fact {
    if fields.is_empty() {
        return fact.clone();
    }
    let wants = |name: &str| fields.iter().any(|f| f == name);
    Fact {
        id: fact.id.clone().filter(|_| wants("id")),
        data: fact.data.clone().filter(|_| wants("data")),
        source: fact.source.clone().filter(|_| wants("source")),
        timestamp: fact.timestamp.filter(|_| wants("timestamp")),
    }
}

#[async_trait]
impl OntboApi for InMemoryClient {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.record("list_profiles", &[]);
        Ok(lock(&self.profiles).iter().map(|p| p.profile.clone()).collect())
    }

    async fn create_profile(&self, requested_id: Option<&str>) -> Result<Profile> {
        self.record("create_profile", &[requested_id.unwrap_or_default()]);
        let id = new_id(requested_id);
        let mut profiles = lock(&self.profiles);
        if profiles.iter().any(|p| p.profile.id == id) {
            return Err(conflict("profile", &id));
        }
        let state = ProfileState::new(id);
        let profile = state.profile.clone();
        profiles.push(state);
        Ok(profile)
    }

    async fn delete_profile(&self, profile_id: &str) -> Result<()> {
        self.record("delete_profile", &[profile_id]);
        let mut profiles = lock(&self.profiles);
        let before = profiles.len();
        profiles.retain(|p| p.profile.id != profile_id);
        if profiles.len() == before {
            return Err(not_found("profile", profile_id));
        }
        Ok(())
    }

    async fn run_profile_update(&self, profile_id: &str) -> Result<Profile> {
        self.record("run_profile_update", &[profile_id]);
        self.with_profile(profile_id, |state| {
            state.update = UpdateStatus::working(0.0);
            state.touch();
            Ok(state.profile.clone())
        })
    }

    async fn stop_profile_update(&self, profile_id: &str) -> Result<Profile> {
        self.record("stop_profile_update", &[profile_id]);
        self.with_profile(profile_id, |state| {
            state.update = UpdateStatus::idle();
            state.touch();
            Ok(state.profile.clone())
        })
    }

    async fn get_profile_update_status(&self, profile_id: &str) -> Result<UpdateStatus> {
        self.record("get_profile_update_status", &[profile_id]);
        self.with_profile(profile_id, |state| Ok(state.update.clone()))
    }

    async fn list_facts(&self, profile_id: &str, options: &ListFactsOptions) -> Result<Vec<Fact>> {
        let skip = options.skip_items.to_string();
        let max = options.max_items.to_string();
        let fields = options.fields.join(",");
        self.record(
            "list_facts",
            &[profile_id, fields.as_str(), skip.as_str(), max.as_str()],
        );
        self.with_profile(profile_id, |state| {
            let take = if options.max_items > 0 {
                options.max_items
            } else {
                usize::MAX
            };
            Ok(state
                .facts
                .iter()
                .skip(options.skip_items)
                .take(take)
                .map(|f| project(f, &options.fields))
                .collect())
        })
    }

    async fn add_fact(
        &self,
        profile_id: &str,
        feedback: &str,
        source_id: Option<&str>,
    ) -> Result<()> {
        self.record("add_fact", &[profile_id, feedback, source_id.unwrap_or_default()]);
        self.with_profile(profile_id, |state| {
            state.facts.push(Fact {
                id: Some(uuid::Uuid::new_v4().to_string()),
                data: Some(feedback.to_string()),
                source: source_id.filter(|s| !s.is_empty()).map(str::to_string),
                timestamp: Some(Utc::now().timestamp()),
            });
            state.touch();
            Ok(())
        })
    }

    async fn get_fact(&self, profile_id: &str, fact_id: &str) -> Result<Fact> {
        self.record("get_fact", &[profile_id, fact_id]);
        self.with_profile(profile_id, |state| {
            state
                .facts
                .iter()
                .find(|f| f.id.as_deref() == Some(fact_id))
                .cloned()
                .ok_or_else(|| not_found("fact", fact_id))
        })
    }

    async fn delete_fact(&self, profile_id: &str, fact_id: &str) -> Result<()> {
        self.record("delete_fact", &[profile_id, fact_id]);
        self.with_profile(profile_id, |state| {
            let before = state.facts.len();
            state.facts.retain(|f| f.id.as_deref() != Some(fact_id));
            if state.facts.len() == before {
                return Err(not_found("fact", fact_id));
            }
            Ok(())
        })
    }

    async fn query_facts(
        &self,
        profile_id: &str,
        query: &str,
        query_type: Option<QueryType>,
    ) -> Result<QueryResponse> {
        let query_type = query_type.unwrap_or_default();
        self.record("query_facts", &[profile_id, query, query_type.as_str()]);
        self.with_profile(profile_id, |state| {
            Ok(QueryResponse {
                result: state.matching_facts(query).join("\n"),
            })
        })
    }

    async fn build_context(&self, profile_id: &str, query: &str) -> Result<QueryResponse> {
        self.record("build_context", &[profile_id, query]);
        self.with_profile(profile_id, |state| {
            let lines: Vec<String> = state
                .matching_facts(query)
                .into_iter()
                .map(|data| format!("- {}", data))
                .collect();
            Ok(QueryResponse {
                result: lines.join("\n"),
            })
        })
    }

    async fn list_scenes(&self, profile_id: &str) -> Result<Vec<String>> {
        self.record("list_scenes", &[profile_id]);
        self.with_profile(profile_id, |state| {
            Ok(state.scenes.iter().map(|s| s.id.clone()).collect())
        })
    }

    async fn create_scene(
        &self,
        profile_id: &str,
        requested_id: Option<&str>,
    ) -> Result<ResponseWithId> {
        self.record("create_scene", &[profile_id, requested_id.unwrap_or_default()]);
        self.with_profile(profile_id, |state| {
            let id = new_id(requested_id);
            if state.scenes.iter().any(|s| s.id == id) {
                return Err(conflict("scene", &id));
            }
            state.scenes.push(Scene {
                id: id.clone(),
                messages: Vec::new(),
            });
            Ok(ResponseWithId { id })
        })
    }

    async fn delete_scene(&self, profile_id: &str, scene_id: &str) -> Result<()> {
        self.record("delete_scene", &[profile_id, scene_id]);
        self.with_profile(profile_id, |state| {
            let before = state.scenes.len();
            state.scenes.retain(|s| s.id != scene_id);
            if state.scenes.len() == before {
                return Err(not_found("scene", scene_id));
            }
            Ok(())
        })
    }

    async fn get_text_from_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
    ) -> Result<Vec<SceneMessage>> {
        self.record("get_text_from_scene", &[profile_id, scene_id]);
        self.with_profile(profile_id, |state| {
            Ok(state.scene_mut(scene_id)?.messages.clone())
        })
    }

    async fn add_text_to_scene(
        &self,
        profile_id: &str,
        scene_id: &str,
        messages: &[SceneMessage],
        options: AddTextOptions,
    ) -> Result<ResponseWithId> {
        let count = messages.len().to_string();
        self.record(
            "add_text_to_scene",
            &[
                profile_id,
                scene_id,
                count.as_str(),
                if options.update_now { "update_now" } else { "" },
                if options.wait_for_result { "wait_for_result" } else { "" },
            ],
        );
        self.with_profile(profile_id, |state| {
            let scene = state.scene_mut(scene_id)?;
            scene.messages.extend_from_slice(messages);
            let id = scene.id.clone();

            if options.update_now {
                state.update = if options.wait_for_result {
                    UpdateStatus::idle()
                } else {
                    UpdateStatus::working(0.0)
                };
            }
            state.touch();
            Ok(ResponseWithId { id })
        })
    }

    async fn query_scenes(&self, profile_id: &str, query: &str) -> Result<Vec<String>> {
        self.record("query_scenes", &[profile_id, query]);
        self.with_profile(profile_id, |state| {
            let terms = terms(query);
            Ok(state
                .scenes
                .iter()
                .filter(|s| s.messages.iter().any(|m| matches_any(&m.content, &terms)))
                .map(|s| s.id.clone())
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn client_with_profile(id: &str) -> InMemoryClient {
        let client = InMemoryClient::new();
        client.create_profile(Some(id)).await.unwrap();
        client
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let client = InMemoryClient::new();
        let named = client.create_profile(Some("alice")).await.unwrap();
        let generated = client.create_profile(None).await.unwrap();

        assert_eq!(named.id, "alice");
        assert!(!generated.id.is_empty());
        assert!(named.created_at.is_some());

        let ids: Vec<String> = client
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["alice".to_string(), generated.id.clone()]);

        client.delete_profile("alice").await.unwrap();
        assert_eq!(client.list_profiles().await.unwrap().len(), 1);
        assert!(client.delete_profile("alice").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_profile_is_conflict() {
        let client = client_with_profile("bob").await;
        let err = client.create_profile(Some("bob")).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let client = InMemoryClient::new();
        let err = client.list_scenes("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.body().unwrap().contains("ghost"));
    }

    #[tokio::test]
    async fn test_update_status_transitions() {
        let client = client_with_profile("p").await;
        assert!(!client.get_profile_update_status("p").await.unwrap().is_working());

        client.run_profile_update("p").await.unwrap();
        let status = client.get_profile_update_status("p").await.unwrap();
        assert!(status.is_working());
        assert_eq!(status.progress, 0.0);

        client.stop_profile_update("p").await.unwrap();
        let status = client.get_profile_update_status("p").await.unwrap();
        assert_eq!(status.status, "IDLE");
        assert_eq!(status.progress, 100.0);
    }

    #[tokio::test]
    async fn test_facts_paging_and_projection() {
        let client = client_with_profile("p").await;
        for i in 0..5 {
            client
                .add_fact("p", &format!("fact number {}", i), Some("chat"))
                .await
                .unwrap();
        }

        let all = client.list_facts("p", &ListFactsOptions::new()).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].source.as_deref(), Some("chat"));
        assert!(all[0].timestamp.is_some());

        let page = client
            .list_facts("p", &ListFactsOptions::new().skip(1).max(2))
            .await
            .unwrap();
        let data: Vec<_> = page.iter().map(|f| f.data.clone().unwrap()).collect();
        assert_eq!(data, vec!["fact number 1", "fact number 2"]);

        let only_data = client
            .list_facts("p", &ListFactsOptions::new().field("data"))
            .await
            .unwrap();
        assert!(only_data.iter().all(|f| f.id.is_none() && f.source.is_none()));
        assert!(only_data.iter().all(|f| f.data.is_some()));
    }

    #[tokio::test]
    async fn test_get_and_delete_fact() {
        let client = client_with_profile("p").await;
        client.add_fact("p", "likes green tea", None).await.unwrap();
        let fact = client.list_facts("p", &ListFactsOptions::new()).await.unwrap()[0].clone();
        let fact_id = fact.id.clone().unwrap();

        assert_eq!(client.get_fact("p", &fact_id).await.unwrap(), fact);
        assert_eq!(fact.source, None);

        client.delete_fact("p", &fact_id).await.unwrap();
        assert!(client.get_fact("p", &fact_id).await.unwrap_err().is_not_found());
        assert!(client.delete_fact("p", &fact_id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_query_and_context_match_terms() {
        let client = client_with_profile("p").await;
        client.add_fact("p", "Likes green tea", None).await.unwrap();
        client.add_fact("p", "Works as a nurse", None).await.unwrap();

        let answer = client
            .query_facts("p", "what TEA do they drink?", None)
            .await
            .unwrap();
        assert_eq!(answer.result, "Likes green tea");

        let context = client.build_context("p", "job and tea").await.unwrap();
        assert_eq!(context.result, "- Likes green tea");

        let none = client.query_facts("p", "is a", Some(QueryType::SingleHop)).await.unwrap();
        assert_eq!(none.result, "");

        let recorded = client.calls();
        let query_call = recorded.iter().find(|c| c.operation == "query_facts").unwrap();
        assert_eq!(query_call.args[2], "FULL_DATA");
    }

    #[tokio::test]
    async fn test_scene_messages_keep_order() {
        let client = client_with_profile("p").await;
        let scene = client.create_scene("p", Some("s1")).await.unwrap();
        assert_eq!(scene.id, "s1");
        assert_eq!(
            client.create_scene("p", Some("s1")).await.unwrap_err().status(),
            Some(409)
        );

        let first = vec![
            SceneMessage::user("I moved to Lyon", 1.0),
            SceneMessage::assistant("How is Lyon?", 2.0),
        ];
        let second = vec![SceneMessage::user("Great food", 3.5)];
        client
            .add_text_to_scene("p", "s1", &first, AddTextOptions::default())
            .await
            .unwrap();
        let ack = client
            .add_text_to_scene("p", "s1", &second, AddTextOptions::default())
            .await
            .unwrap();
        assert_eq!(ack.id, "s1");

        let messages = client.get_text_from_scene("p", "s1").await.unwrap();
        let expected: Vec<SceneMessage> = first.into_iter().chain(second).collect();
        assert_eq!(messages, expected);

        assert_eq!(client.query_scenes("p", "lyon").await.unwrap(), vec!["s1"]);
        assert!(client.query_scenes("p", "paris").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_text_update_flags() {
        let client = client_with_profile("p").await;
        client.create_scene("p", Some("s")).await.unwrap();
        let msg = [SceneMessage::user("hello there", 1.0)];

        client
            .add_text_to_scene("p", "s", &msg, AddTextOptions::new().update_now(true))
            .await
            .unwrap();
        assert!(client.get_profile_update_status("p").await.unwrap().is_working());

        client
            .add_text_to_scene(
                "p",
                "s",
                &msg,
                AddTextOptions::new().update_now(true).wait_for_result(true),
            )
            .await
            .unwrap();
        assert!(!client.get_profile_update_status("p").await.unwrap().is_working());
    }

    #[tokio::test]
    async fn test_scene_not_found_and_delete() {
        let client = client_with_profile("p").await;
        let err = client
            .add_text_to_scene("p", "nope", &[], AddTextOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let generated = client.create_scene("p", None).await.unwrap();
        assert_eq!(client.list_scenes("p").await.unwrap(), vec![generated.id.clone()]);
        client.delete_scene("p", &generated.id).await.unwrap();
        assert!(client.list_scenes("p").await.unwrap().is_empty());
        assert!(client
            .get_text_from_scene("p", &generated.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let client = InMemoryClient::new();
        let _ = client.get_fact("x", "f").await;
        client.create_profile(Some("x")).await.unwrap();

        assert_eq!(client.call_count("get_fact"), 1);
        assert_eq!(
            client.calls(),
            vec![
                RecordedCall {
                    operation: "get_fact",
                    args: vec!["x".into(), "f".into()],
                },
                RecordedCall {
                    operation: "create_profile",
                    args: vec!["x".into()],
                },
            ]
        );
    }
}
