/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses.
 *
 * # Response Format
 *
 * Error responses use the same envelope as successful ones:
 * ```json
 * {
 *   "status": "failed",
 *   "message": "Invalid ID"
 * }
 * ```
 *
 * `failed` is used for 4xx responses and `error` for 5xx responses.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;
use crate::shared::ApiResponse;

impl IntoResponse for BackendError {
    /// Convert a backend error into an enveloped JSON response
    ///
    /// Server errors are logged here with their full cause; the client only
    /// sees the generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ApiResponse::message(self.api_status(), self.message());
        (status, Json(body)).into_response()
    }
}
