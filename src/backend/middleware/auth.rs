/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. The session
 * token is read from the `token` cookie or an `Authorization: Bearer`
 * header, verified, and the resulting user is attached to the request
 * extensions for handlers to pick up through [`AuthUser`].
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::sessions::{extract_session_token, verify_token};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const LOGIN_REQUIRED: &str = "Please login first";

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Finds the session token (bearer header first, then cookie)
/// 2. Verifies signature and expiry
/// 3. Checks that the user still exists
/// 4. Attaches an [`AuthenticatedUser`] to the request extensions
///
/// Returns 401 with the envelope if any step fails.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = extract_session_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing session token");
        BackendError::unauthorized(LOGIN_REQUIRED)
    })?;

    let claims = verify_token(&app_state.config.jwt_secret, &token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized(LOGIN_REQUIRED)
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized(LOGIN_REQUIRED)
    })?;

    if !user_exists(&app_state.db, user_id).await? {
        tracing::warn!("Token for unknown user: {}", user_id);
        return Err(BackendError::unauthorized(LOGIN_REQUIRED));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

async fn user_exists(pool: &SqlitePool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    Ok(get_user_by_id(pool, user_id).await?.is_some())
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`auth_middleware`]; elsewhere it rejects
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized(LOGIN_REQUIRED)
            })?;

        Ok(AuthUser(user))
    }
}
