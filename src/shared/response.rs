//! Response Envelope
//!
//! Every API response body has the same shape so the frontend can branch on
//! a single `status` field:
//!
//! ```json
//! { "status": "success", "data": { ... } }
//! { "status": "failed", "message": "Please login first" }
//! { "status": "error", "message": "Database error" }
//! ```
//!
//! `failed` marks problems the caller can fix (validation, authentication,
//! missing records). `error` marks server-side failures.

use serde::{Deserialize, Serialize};

/// Outcome carried in the `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Failed,
    Error,
}

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ApiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn success(data: T) -> Self {
        Self {
            status: ApiStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// Successful response carrying `data` and a confirmation message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Success,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Response without data
    pub fn message(status: ApiStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            message: Some(message.into()),
        }
    }
}
