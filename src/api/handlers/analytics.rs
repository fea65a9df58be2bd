//! Handler for link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the visit count and visit list for a short link.
///
/// # Endpoint
///
/// `GET /url/analytics/{short_id}`
///
/// # Response
///
/// ```json
/// {
///   "totalClicks": 2,
///   "analytics": [
///     { "timestamp": 1700000000000 },
///     { "timestamp": 1700000004200 }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 with `{ "error": "Short URL not found" }` for unknown identifiers.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.registry.get_analytics(&short_id).await?;

    Ok(Json(analytics.into()))
}
