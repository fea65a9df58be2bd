#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use link_registry::application::services::RegistryService;
use link_registry::domain::repositories::LinkRepository;
use link_registry::infrastructure::persistence::InMemoryLinkRepository;
use link_registry::routes::app_router;
use link_registry::state::AppState;
use link_registry::utils::id_generator::RandomIdGenerator;
use std::sync::Arc;

pub fn any_origin() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn create_test_state(repository: Arc<dyn LinkRepository>) -> AppState {
    let registry = RegistryService::new(repository, Arc::new(RandomIdGenerator::default()), 5);
    AppState::new(Arc::new(registry))
}

/// Full application router over a fresh in-memory store.
pub fn create_test_app() -> (Router, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let state = create_test_state(repository.clone());
    (app_router(state, &any_origin()), repository)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (app, repository) = create_test_app();
    (TestServer::new(app).unwrap(), repository)
}

/// Creates a short link through the API and returns its identifier.
pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/url")
        .json(&serde_json::json!({ "url": url }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<serde_json::Value>()["shortId"]
        .as_str()
        .unwrap()
        .to_string()
}
