/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate email format, password length and required fields
 * 2. Check if the email is already registered
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Issue a JWT, set the `token` cookie and return the profile
 *
 * The email check is repeated by the UNIQUE index, so two concurrent
 * registrations for one address still produce a single account.
 */

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use bcrypt::hash;

use crate::backend::auth::handlers::login::start_session;
use crate::backend::auth::handlers::types::{AuthData, RegisterRequest};
use crate::backend::auth::users::{create_user, get_user_by_email, normalize_email, NewUser};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

const EMAIL_TAKEN: &str = "Email already registered";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid email, short password or missing fields
/// * `409 Conflict` - Email already registered
/// * `500 Internal Server Error` - Hashing, database or token failure
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<AuthData>>), BackendError> {
    let email = normalize_email(&request.email);
    tracing::info!("Register request for email: {}", email);

    request.validate().map_err(|e| {
        tracing::warn!("Invalid registration for {} ({}): {}", email, e.field(), e);
        e
    })?;

    if get_user_by_email(&state.db, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::conflict(EMAIL_TAKEN));
    }

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;

    let new_user = NewUser {
        email,
        password_hash,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        phone: request.phone.trim().to_string(),
    };
    let user = create_user(&state.db, new_user).await.map_err(|e| {
        if is_unique_violation(&e) {
            tracing::warn!("Concurrent registration lost the race: {:?}", e);
            BackendError::conflict(EMAIL_TAKEN)
        } else {
            BackendError::from(e)
        }
    })?;

    tracing::info!("User created successfully: {} ({})", user.id, user.email);
    let (headers, data) = start_session(&state.config, user)?;
    Ok((
        StatusCode::CREATED,
        headers,
        Json(ApiResponse::success_with_message(data, "Registration successful")),
    ))
}
