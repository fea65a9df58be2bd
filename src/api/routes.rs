//! API route configuration.

use crate::api::handlers::{analytics_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link registry routes, mounted under `/url`.
///
/// # Endpoints
///
/// - `POST /`                       - Create a short link
/// - `GET  /analytics/{short_id}`   - Visit count and visit list
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shorten_handler))
        .route("/analytics/{short_id}", get(analytics_handler))
}
