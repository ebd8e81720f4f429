//! Response types for API endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.kind.to_string(),
            message: err.message.clone(),
            details: None,
        }
    }
}
