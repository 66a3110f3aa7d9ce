use thiserror::Error;

use crate::core::validation::{RuleError, Violations};
use crate::infrastructure::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup by id found nothing
    #[error("Not found")]
    NotFound,

    /// Request body missing or not valid JSON for the expected shape
    #[error("Request body cannot be blank")]
    MalformedBody,

    /// One or more field rules failed
    #[error("Validation failed: {} violation(s)", .0.len())]
    ValidationFailed(Violations),

    /// Store rejected a write because a unique column already holds the value
    #[error("Unique constraint violated on column `{column}`")]
    UniquenessConflict { column: String },

    /// Store rejected a write for some other integrity reason
    #[error("Unrecognized validation error: {0}")]
    UnrecognizedIntegrity(String),

    /// A declared rule cannot be evaluated. This is a defect, not a client error.
    #[error("Invalid validation rule: {0}")]
    Configuration(#[from] RuleError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::Configuration(_) | AppError::Storage(_))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { column } => AppError::UniquenessConflict { column },
            StorageError::IntegrityViolation(detail) => AppError::UnrecognizedIntegrity(detail),
            StorageError::Backend(detail) => AppError::Storage(detail),
        }
    }
}
