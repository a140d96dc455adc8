/**
 * Login Handler
 *
 * This module implements POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by (normalized) email
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue a JWT and set it as the `token` cookie
 *
 * Unknown emails and wrong passwords produce the same 401 message, and
 * both paths spend one bcrypt computation.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::Json,
};
use bcrypt::{hash, verify};

use crate::backend::auth::handlers::types::{AuthData, LoginRequest, UserProfile};
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::auth::users::{get_user_by_email, User};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, ServerConfig};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Issue a token for `user` and build the cookie header carrying it
pub(super) fn start_session(config: &ServerConfig, user: User) -> Result<(HeaderMap, AuthData), BackendError> {
    let token = create_token(&config.jwt_secret, config.token_ttl, user.id, &user.email)?;

    let cookie = session_cookie(&token, config.token_ttl, config.cookie_secure).map_err(|e| {
        tracing::error!("Failed to build session cookie: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((
        headers,
        AuthData {
            user: UserProfile::from(user),
            token,
        },
    ))
}

/// Check `password` against a stored hash
///
/// With no stored hash the password is hashed at `cost` and discarded, so a
/// miss takes as long as a mismatch.
fn check_password(password: &str, stored: Option<&str>, cost: u32) -> Result<bool, BackendError> {
    match stored {
        Some(stored) => Ok(verify(password, stored)?),
        None => {
            hash(password, cost)?;
            Ok(false)
        }
    }
}

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Database, hashing or token failure
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<(HeaderMap, Json<ApiResponse<AuthData>>), BackendError> {
    tracing::info!("Login request for email: {}", request.email);

    let user = get_user_by_email(&state.db, &request.email).await?;
    let stored = user.as_ref().map(|user| user.password_hash.as_str());

    if !check_password(&request.password, stored, state.config.bcrypt_cost)? {
        match &user {
            Some(user) => tracing::warn!("Wrong password for user: {}", user.id),
            None => tracing::warn!("Login for unknown email: {}", request.email),
        }
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }
    let Some(user) = user else {
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    tracing::info!("User logged in: {}", user.id);
    let (headers, data) = start_session(&state.config, user)?;
    Ok((headers, Json(ApiResponse::success_with_message(data, "Login successful"))))
}
