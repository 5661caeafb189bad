//! Common test utilities: a mock Ontbo server and a client pointed at it.

use mockito::{Mock, ServerGuard};
use ontbo::OntboClient;

#[allow(dead_code)]
pub const TOKEN: &str = "test-token";
#[allow(dead_code)]
pub const BEARER: &str = "Bearer test-token";

/// Start a mock server and build a client for it.
pub async fn setup() -> (ServerGuard, OntboClient) {
    ontbo_observability::init_for_tests();
    let server = mockito::Server::new_async().await;
    let client = OntboClient::new(server.url(), TOKEN).expect("mock server URL is valid");
    (server, client)
}

/// Mock answering `method path` with a JSON body; requires the bearer token.
#[allow(dead_code)]
pub async fn json_mock(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock(method, path)
        .match_header("authorization", BEARER)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
