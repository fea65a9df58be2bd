//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                   - Storage health check
//! - `POST /url`                      - Create a short link
//! - `GET  /url/analytics/{short_id}` - Visit analytics for a link
//! - `GET  /{short_id}`               - Redirect and record a visit
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Cross-origin access for the browser client
//!
//! Trailing-slash normalization wraps the router at serve time, see
//! [`crate::server::run`].

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allowed_origins` - origins allowed to call the API from a browser;
///   `*` allows any origin
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/url", api::routes::url_routes())
        .route("/{short_id}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer())
}
