//! Health check
//!
//! `GET /health` answers without touching the database so load balancers
//! can probe it cheaply.

use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::shared::ApiResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthInfo {
    pub service: String,
    pub version: String,
}

pub async fn health() -> Json<ApiResponse<HealthInfo>> {
    Json(ApiResponse::success(HealthInfo {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
