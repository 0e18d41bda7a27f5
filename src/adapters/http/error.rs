//! Domain-to-HTTP error translation.
//!
//! Handlers return `ApiResult<T>`; the `?` operator lifts any `DomainError`
//! into an `ApiError`, which renders the standard `{code, message, details}`
//! body with the matching status code.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// A domain error on its way out of the API.
#[derive(Debug, Clone)]
pub struct ApiError(pub DomainError);

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

/// Maps an error code to the HTTP status it should produce.
pub fn status_for(code: ErrorCode) -> StatusCode {
    if code.is_validation() {
        return StatusCode::BAD_REQUEST;
    }
    if code.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    match code {
        ErrorCode::InvalidStateTransition => StatusCode::BAD_REQUEST,
        ErrorCode::AlreadyConverted | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.0.code, "request failed: {}", self.0.message);
        } else {
            tracing::debug!(code = %self.0.code, "request rejected: {}", self.0.message);
        }

        // Internal details stay in the logs, not on the wire.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.0.message
        };

        let body = ErrorBody {
            code: self.0.code.to_string(),
            message,
            details: if status == StatusCode::INTERNAL_SERVER_ERROR {
                HashMap::new()
            } else {
                self.0.details
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        assert_eq!(status_for(ErrorCode::EmptyField), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::ValidationFailed),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(status_for(ErrorCode::ClientNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::CommentNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflicts_map_to_409() {
        assert_eq!(status_for(ErrorCode::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::AlreadyConverted), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_codes_map_to_401_and_403() {
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
