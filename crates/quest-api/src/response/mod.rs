//! HTTP error mapping and response wrappers.
//!
//! Every handler returns [`ApiResult`]; failures funnel through [`ApiError`],
//! which renders as `{"error": {"code", "message", "details"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quest_common::ErrorResponse;
use quest_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Errors surfaced at the HTTP boundary.
///
/// Service failures carry their own status and code; the remaining variants
/// cover request decoding problems that never reach the service layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    Malformed {
        code: &'static str,
        message: String,
    },

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,
}

impl ApiError {
    /// Rejection for an unparseable path segment.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::Malformed {
            code: "INVALID_PATH_PARAMETER",
            message: msg.into(),
        }
    }

    /// Rejection for a bad query string value.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::Malformed {
            code: "INVALID_QUERY_PARAMETER",
            message: msg.into(),
        }
    }

    /// Rejection for a request body that failed to deserialize.
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::Malformed {
            code: "INVALID_REQUEST_BODY",
            message: msg.into(),
        }
    }

    fn kind(&self) -> (StatusCode, &str) {
        match self {
            Self::Service(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, e.error_code())
            }
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Malformed { code, .. } => (StatusCode::BAD_REQUEST, code),
            Self::MissingAuth => (StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION"),
            Self::InvalidAuthFormat => (StatusCode::UNAUTHORIZED, "INVALID_AUTHORIZATION_FORMAT"),
        }
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind().0
    }

    /// Machine-readable code placed in the response body.
    #[must_use]
    pub fn error_code(&self) -> &str {
        self.kind().1
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.kind();
        let code = code.to_string();

        if status.is_server_error() {
            error!(code = %code, error = %self, "request failed");
        }

        // Field-level validation failures keep their per-field breakdown.
        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorResponse {
                code,
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wraps a response and forces its status to 201.
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

/// Empty 204 response.
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
