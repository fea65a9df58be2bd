//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shortId": "Xk3_p9aQ" }
/// ```
///
/// # Errors
///
/// Returns 400 with `{ "error": "URL is required" }` when `url` is missing,
/// `null` or empty, or when the body is not JSON at all. A JSON body whose
/// `url` is an array or object, or which is not an object, gets 400 with
/// `{ "error": "URL must be a string" }`. Numeric and boolean `url` values
/// are stored in their text form.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(JsonRejection::JsonDataError(rejection)) => {
            debug!("Rejected shorten body: {}", rejection.body_text());
            return Err(AppError::bad_request("URL must be a string"));
        }
        Err(rejection) => {
            debug!("Shorten body is not JSON: {}", rejection.body_text());
            Json(ShortenRequest::default())
        }
    };

    payload.validate()?;

    let url = payload.url.unwrap_or_default();
    let short_id = state.registry.shorten(&url).await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse { short_id })))
}
