/**
 * Server Initialization
 *
 * Builds the application from a loaded configuration:
 * 1. Open the database and run migrations
 * 2. Create the shared `AppState`
 * 3. Configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::ServerConfig;

/// Create the application router from configuration
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing ReGain backend server");

    let db = load_database(&config).await?;
    let app_state = AppState::new(db, config);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
