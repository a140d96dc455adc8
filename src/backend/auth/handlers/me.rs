/**
 * Session Check Handler
 *
 * GET /auth returns the profile of the user owning the session token.
 * The auth middleware has already verified the token; this handler only
 * loads the user record.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserProfile;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Get the current user's profile
///
/// # Errors
///
/// * `401 Unauthorized` - The token belongs to a user that no longer exists
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<ApiResponse<UserProfile>>, BackendError> {
    let user = get_user_by_id(&state.db, auth.user_id).await?.ok_or_else(|| {
        tracing::warn!("Session for missing user: {}", auth.user_id);
        BackendError::unauthorized("Please login first")
    })?;

    Ok(Json(ApiResponse::success(UserProfile::from(user))))
}
