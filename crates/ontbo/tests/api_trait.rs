//! The same caller code running over the HTTP client and the in-memory double.

mod common;

use std::sync::Arc;

use common::{json_mock, setup};
use mockito::Matcher;
use ontbo::{AddTextOptions, InMemoryClient, OntboApi, SceneMessage};

/// Record a conversation and ask for context, the way an agent would.
async fn remember_and_recall(api: Arc<dyn OntboApi>, profile_id: &str) -> ontbo::Result<String> {
    let scene = api.create_scene(profile_id, Some("chat-1")).await?;
    api.add_text_to_scene(
        profile_id,
        &scene.id,
        &[SceneMessage::user("My sister Clara lives in Oslo", 10.0)],
        AddTextOptions::new().update_now(true).wait_for_result(true),
    )
    .await?;
    api.add_fact(profile_id, "Sister Clara lives in Oslo", Some(scene.id.as_str()))
        .await?;
    Ok(api.build_context(profile_id, "Where is Clara?").await?.result)
}

#[tokio::test]
async fn test_flow_over_in_memory_client() {
    let memory = Arc::new(InMemoryClient::new());
    memory.create_profile(Some("alice")).await.unwrap();

    let context = remember_and_recall(memory.clone(), "alice").await.unwrap();
    assert_eq!(context, "- Sister Clara lives in Oslo");

    assert_eq!(memory.call_count("add_text_to_scene"), 1);
    let fact = &memory.list_facts("alice", &Default::default()).await.unwrap()[0];
    assert_eq!(fact.source.as_deref(), Some("chat-1"));
}

#[tokio::test]
async fn test_flow_over_http_client() {
    let (mut server, client) = setup().await;
    let scene = server
        .mock("POST", "/profiles/alice/scenes")
        .match_query(Matcher::UrlEncoded("requested_id".into(), "chat-1".into()))
        .with_status(200)
        .with_body(r#"{"id": "chat-1"}"#)
        .create_async()
        .await;
    let text = server
        .mock("POST", "/profiles/alice/scenes/chat-1/text")
        .match_query(Matcher::Exact("update_now=true&wait_for_result=true".into()))
        .with_status(200)
        .with_body(r#"{"id": "chat-1"}"#)
        .create_async()
        .await;
    let fact = server
        .mock("POST", "/profiles/alice/facts")
        .match_query(Matcher::UrlEncoded("source_id".into(), "chat-1".into()))
        .with_status(200)
        .create_async()
        .await;
    let context = server
        .mock("GET", "/profiles/alice/context")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"result": "Clara lives in Oslo."}"#)
        .create_async()
        .await;

    let result = remember_and_recall(Arc::new(client), "alice").await.unwrap();
    assert_eq!(result, "Clara lives in Oslo.");

    for mock in [scene, text, fact, context] {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_unknown_profile_fails_the_same_way() {
    let memory: Arc<dyn OntboApi> = Arc::new(InMemoryClient::new());
    let memory_err = memory.list_scenes("ghost").await.unwrap_err();

    let (mut server, client) = setup().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/profiles/ghost/scenes",
        404,
        r#"{"detail": "profile 'ghost' not found"}"#,
    )
    .await;
    let http: Arc<dyn OntboApi> = Arc::new(client);
    let http_err = http.list_scenes("ghost").await.unwrap_err();

    assert_eq!(memory_err.status(), http_err.status());
    assert!(memory_err.is_not_found() && http_err.is_not_found());
}
