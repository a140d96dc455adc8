//! JSON body extractor that rejects with the response envelope
//!
//! `axum::Json` answers malformed bodies with a plain-text rejection.
//! [`ApiJson`] wraps it so the client gets `{"status": "failed", ...}`
//! like every other error.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            BackendError::from(rejection)
        })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request as HttpRequest, StatusCode},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct NamedBody {
        name: String,
    }

    fn request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ApiJson(body) = ApiJson::<NamedBody>::from_request(request(r#"{"name":"x"}"#), &()).await.unwrap();
        assert_eq!(body.name, "x");
    }

    #[tokio::test]
    async fn test_malformed_body_is_client_error() {
        let err = ApiJson::<NamedBody>::from_request(request("{not json"), &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field_is_client_error() {
        let err = ApiJson::<NamedBody>::from_request(request("{}"), &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.api_status(), crate::shared::ApiStatus::Failed);
    }
}
