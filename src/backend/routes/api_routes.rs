/**
 * Authentication Routes
 *
 * - `POST /register`, `POST /login`, `POST /logout` - public
 * - `GET /auth` - session check, behind the auth middleware
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, register};
use crate::backend::health::health;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Add authentication and health routes to `router`
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth", get(get_me))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    router
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected)
}
