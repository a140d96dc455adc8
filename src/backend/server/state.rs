/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds the only shared resources of the server:
 * - the SQLite connection pool
 * - the immutable server configuration
 *
 * Both are cheap to clone (`SqlitePool` is reference counted internally and
 * the configuration sits behind an `Arc`), so the state is cloned into
 * every handler call.
 *
 * # Example
 *
 * ```rust,no_run
 * use regain::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let radius = state.config.default_search_radius_km;
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::shared::ServerConfig;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Server configuration, read-only after startup
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: ServerConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// Lets handlers that only need the database extract `State<SqlitePool>`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Implement FromRef for the server configuration
impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// State over a fresh in-memory database with a fast bcrypt cost
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let pool = crate::backend::server::config::memory_pool()
        .await
        .expect("in-memory database");
    let config = ServerConfig::builder()
        .jwt_secret("unit-test-secret")
        .bcrypt_cost(crate::shared::config::MIN_BCRYPT_COST)
        .build()
        .expect("test config");
    AppState::new(pool, config)
}
