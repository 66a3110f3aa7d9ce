//! Maps [`AppError`] onto the uniform error payload returned by every non-2xx response.

use axum::{Json, http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::api::models::ErrorPayload;
use crate::core::errors::AppError;
use crate::core::validation::Violations;

pub const NOT_FOUND: &str = "Not found";
pub const BLANK_BODY: &str = "Request body cannot be blank";
pub const VALIDATION_FAILED: &str = "Validation failed";
pub const VALIDATION_ERROR: &str = "Validation error";
pub const UNRECOGNIZED_VALIDATION_ERROR: &str = "Unrecognized validation error";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const ALREADY_REGISTERED: &str = "Already registered";

/// The unique column whose conflicts are reported back to clients as a field violation.
const EMAIL_COLUMN: &str = "email";

impl ErrorPayload {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self::with_trace(status, message, Violations::new())
    }

    pub fn with_trace(status: StatusCode, message: &str, trace: Violations) -> Self {
        ErrorPayload {
            code: status.as_u16(),
            message: message.to_string(),
            trace,
        }
    }
}

pub fn status_and_payload(err: &AppError) -> (StatusCode, ErrorPayload) {
    let status = match err {
        AppError::NotFound => StatusCode::NOT_FOUND,
        AppError::Configuration(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = match err {
        AppError::NotFound => ErrorPayload::new(status, NOT_FOUND),
        AppError::MalformedBody => ErrorPayload::new(status, BLANK_BODY),
        AppError::ValidationFailed(violations) => ErrorPayload::with_trace(status, VALIDATION_FAILED, violations.clone()),
        AppError::UniquenessConflict { column } if column == EMAIL_COLUMN => {
            ErrorPayload::with_trace(status, VALIDATION_ERROR, Violations::single(EMAIL_COLUMN, ALREADY_REGISTERED))
        }
        AppError::UniquenessConflict { .. } | AppError::UnrecognizedIntegrity(_) => {
            ErrorPayload::new(status, UNRECOGNIZED_VALIDATION_ERROR)
        }
        AppError::Configuration(_) | AppError::Storage(_) => ErrorPayload::new(status, INTERNAL_ERROR),
    };
    (status, payload)
}

// Newtype wrapper for AppError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if !self.0.is_client_error() {
            error!(error = %self.0, "request failed");
        }
        let (status, payload) = status_and_payload(&self.0);
        (status, Json(payload)).into_response()
    }
}
