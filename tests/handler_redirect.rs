mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use link_registry::api::handlers::redirect_handler;
use link_registry::domain::entities::NewLink;
use link_registry::domain::repositories::LinkRepository;
use link_registry::infrastructure::persistence::InMemoryLinkRepository;
use serde_json::json;
use std::sync::Arc;

async fn redirect_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository
        .create(NewLink {
            short_id: "redirect1".to_string(),
            redirect_url: "https://example.com/target".to_string(),
        })
        .await
        .unwrap();

    let state = common::create_test_state(repository.clone());
    let app = Router::new()
        .route("/{short_id}", get(redirect_handler))
        .with_state(state);

    (TestServer::new(app).unwrap(), repository)
}

#[tokio::test]
async fn test_redirect_success() {
    let (server, _repository) = redirect_server().await;

    let response = server.get("/redirect1").await;

    response.assert_status(StatusCode::FOUND);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_records_visit() {
    let (server, repository) = redirect_server().await;

    server
        .get("/redirect1")
        .await
        .assert_status(StatusCode::FOUND);

    let link = repository
        .find_by_short_id("redirect1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link.visit_history.len(), 1);
    assert!(link.visit_history[0].timestamp > 0);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, repository) = redirect_server().await;

    let response = server.get("/doesNotExist").await;

    response.assert_status_not_found();
    response.assert_json(&json!({ "error": "Short URL not found" }));
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (server, _repository) = redirect_server().await;

    server.get("/REDIRECT1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_unencodable_target() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository
        .create(NewLink {
            short_id: "broken".to_string(),
            redirect_url: "https://example.com/\nbad".to_string(),
        })
        .await
        .unwrap();

    let state = common::create_test_state(repository.clone());
    let app = Router::new()
        .route("/{short_id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/broken").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Internal server error" }));
}
