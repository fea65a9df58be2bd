//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its target URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Request Flow
///
/// 1. Append a visit to the link and fetch it in one store operation
/// 2. Return `302 Found` with `Location` set to the target URL
///
/// # Errors
///
/// Returns 404 with `{ "error": "Short URL not found" }` for unknown identifiers.
/// Returns 500 if the stored target cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target = state.registry.resolve_and_track(&short_id).await?;

    let location = HeaderValue::try_from(target.as_str()).map_err(|_| {
        AppError::internal(format!(
            "Target URL for '{}' is not a valid Location header",
            short_id
        ))
    })?;

    debug!(short_id = %short_id, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
