//! JSON error responses for the API.
//!
//! Every failure crosses the handler boundary as a payload, never a panic:
//! auth/ownership/lookup failures use the `{error, message}` shape, field
//! validation uses `{errors: {field: [messages]}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::ValidationErrors;

/// Error payload for auth, ownership, and lookup failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Failures a request can surface to the client.
#[derive(Debug)]
pub enum ApiError {
    /// Requester is not authenticated or does not own the record.
    Unauthorized(String),
    /// CSRF token missing or mismatched.
    CsrfRejected,
    /// No record with the requested id.
    NotFound(String),
    /// One or more fields failed validation.
    Validation(ValidationErrors),
    /// Underlying storage failure.
    Database(sqlx::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::CsrfRejected => write!(f, "CSRF token missing or invalid"),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "unauthorized",
                    message,
                }),
            )
                .into_response(),
            ApiError::CsrfRejected => (
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: "csrf_rejected",
                    message: "CSRF token missing or invalid".to_string(),
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "not_found",
                    message,
                }),
            )
                .into_response(),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "internal",
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodDraft;

    #[test]
    fn test_unauthorized_status() {
        let response = ApiError::Unauthorized("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_status() {
        let errors = FoodDraft::default().validate().unwrap_err();
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_status() {
        let response = ApiError::NotFound("food x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
