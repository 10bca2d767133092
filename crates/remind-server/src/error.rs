//! Service error to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::error;

use remind_service::ServiceError;

/// JSON error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// The error payload inside the envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
    /// The offending input field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Wrapper so handlers can return `Result<_, ApiError>` with `?`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            ServiceError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "validation_error",
                    message,
                    field: Some(field),
                },
            ),
            ServiceError::NotFound { message } => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "not_found",
                    message,
                    field: None,
                },
            ),
            ServiceError::AlreadyExists { message } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "already_exists",
                    message,
                    field: None,
                },
            ),
            ServiceError::Internal { message } => {
                // Internals stay in the log, not on the wire.
                error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail {
                        code: "internal_error",
                        message: "internal server error".into(),
                        field: None,
                    },
                )
            }
        };
        (status, Json(ErrorBody { error: detail })).into_response()
    }
}
