use serde::Serialize;
use utoipa::ToSchema;

use crate::core::validation::Violations;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorPayload {
    pub code: u16,
    pub message: String,
    /// Field name to violation message. Empty when the failure is not tied to fields.
    #[schema(value_type = Object, example = json!({"email": "Already registered"}))]
    pub trace: Violations,
}
