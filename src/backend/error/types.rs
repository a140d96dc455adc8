/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised directly by handlers with an explicit status code:
 * - Missing or invalid session
 * - Records that do not exist or belong to someone else
 * - Duplicate registrations
 *
 * ## Wrapped Errors
 *
 * Failures bubbling up from libraries through `?`:
 * - `sqlx` database errors
 * - `jsonwebtoken` signing errors
 * - `bcrypt` hashing errors
 * - request validation (`SharedError`)
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{ApiStatus, SharedError};

/// Backend-specific error types
///
/// Each variant maps to an HTTP status code and is rendered as the JSON
/// response envelope by the `IntoResponse` implementation in `conversion`.
///
/// # Usage
///
/// ```rust
/// use regain::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// let err = BackendError::unauthorized("Please login first");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("{message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Token signing error
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordError(#[from] bcrypt::BcryptError),

    /// Request validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    BodyRejection(#[from] JsonRejection),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 401: no valid session
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 404: missing record, or a record the caller may not touch
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 409: uniqueness conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// 400: request rejected
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `DatabaseError` - 409 for unique violations, otherwise 500
    /// - `TokenError`, `PasswordError` - 500
    /// - `SharedError` - 400
    /// - `BodyRejection` - status chosen by axum (400/415/422)
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(err) if is_unique_violation(err) => StatusCode::CONFLICT,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TokenError(_) | Self::PasswordError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::BodyRejection(rejection) => rejection.status(),
        }
    }

    /// Envelope status: `failed` for client errors, `error` for server errors
    pub fn api_status(&self) -> ApiStatus {
        if self.status_code().is_server_error() {
            ApiStatus::Error
        } else {
            ApiStatus::Failed
        }
    }

    /// Get the message shown to the client
    ///
    /// Server-side failures are logged in full and reported with a generic
    /// message so driver and library internals stay out of responses.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseError(err) if is_unique_violation(err) => "Record already exists".to_string(),
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::TokenError(_) | Self::PasswordError(_) => "Server error".to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::BodyRejection(rejection) => rejection.body_text(),
        }
    }
}

/// True when a database error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BackendError::from(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_status() {
        assert_eq!(BackendError::bad_request("x").api_status(), ApiStatus::Failed);
        assert_eq!(BackendError::from(sqlx::Error::PoolTimedOut).api_status(), ApiStatus::Error);
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("status", "Invalid status").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(backend_error.message(), "Invalid status");
    }

    #[test]
    fn test_database_message_is_generic() {
        let error = BackendError::from(sqlx::Error::Protocol("secret detail".to_string()));
        assert_eq!(error.message(), "Database error");
    }
}
