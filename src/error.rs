//! Application error type and its HTTP representation.
//!
//! Every failure is scoped to a single request. Handlers return
//! `Result<_, AppError>` and the [`IntoResponse`] impl turns the error into a
//! status code plus a `{ "error": "<message>" }` JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::utils::db_error::is_unique_violation_on_short_id;

/// Errors surfaced by the registry and its storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{message}")]
    Validation { message: String },

    /// Unknown short identifier.
    #[error("{message}")]
    NotFound { message: String },

    /// Identifier already taken in the store.
    #[error("{message}")]
    DuplicateKey { message: String },

    /// Storage or other unexpected failure.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::DuplicateKey {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                "Internal server error".to_string()
            }
            AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::DuplicateKey { message } => message,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_short_id(&e) {
            return AppError::duplicate_key("Short ID already exists");
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message)
    }
}
