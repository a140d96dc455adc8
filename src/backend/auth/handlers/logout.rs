//! Logout Handler
//!
//! POST /logout expires the session cookie. Tokens are not tracked
//! server-side, so a copied token stays valid until it expires.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::Json,
};

use crate::backend::auth::sessions::clear_session_cookie;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, ApiStatus};

/// Clear the session cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>) -> (HeaderMap, Json<ApiResponse<()>>) {
    let mut headers = HeaderMap::new();
    match clear_session_cookie(state.config.cookie_secure) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(e) => tracing::error!("Failed to build logout cookie: {:?}", e),
    }
    (headers, Json(ApiResponse::message(ApiStatus::Success, "Logged out")))
}
