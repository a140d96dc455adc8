//! Shared Error Types
//!
//! This module defines the error raised when a request payload fails
//! validation, before any storage is touched. Malformed JSON never reaches
//! this type; the body extractor rejects it first.
//!
//! # Usage
//!
//! ```rust
//! use regain::shared::error::SharedError;
//!
//! // Create a validation error
//! let error = SharedError::validation("email", "Invalid email format");
//! assert_eq!(error.field(), "email");
//! ```
use thiserror::Error;

/// Errors raised while checking request data
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
