//! API error mapping.
//!
//! Every API failure is rendered as
//! `{"error": {"code": "...", "message": "...", "details": {...}}}`.
//! Webhook routes do not use this type; they answer with an acknowledgement
//! body instead.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode};

/// Error body returned by API routes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details: HashMap::new(),
            },
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::UserNotFound | ErrorCode::CourseNotFound | ErrorCode::PurchaseNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::InvalidStateTransition
        | ErrorCode::CourseNotPublished
        | ErrorCode::AlreadyEnrolled
        | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::PaymentFailed | ErrorCode::IdentityProviderFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::InsufficientPermissions => ErrorCode::Forbidden,
            AuthError::ServiceUnavailable(_) => ErrorCode::InternalError,
            _ => ErrorCode::Unauthorized,
        };
        Self(DomainError::new(code, err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let DomainError {
            code,
            message,
            details,
        } = self.0;

        // Store and internal failures are logged, never echoed
        let body = if status.is_server_error() {
            tracing::error!(code = %code, error = %message, "Request failed");
            ErrorResponse::new(code.to_string(), "Internal server error")
        } else {
            ErrorResponse {
                error: ErrorBody {
                    code: code.to_string(),
                    message,
                    details,
                },
            }
        };

        (status, Json(body)).into_response()
    }
}
