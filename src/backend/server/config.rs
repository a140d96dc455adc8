/**
 * Database Setup
 *
 * This module opens the SQLite connection pool named by the server
 * configuration and brings the schema up to date.
 *
 * # Migrations
 *
 * Migrations live in `migrations/` at the crate root and are embedded at
 * compile time with `sqlx::migrate!`. They run on every startup; already
 * applied migrations are skipped.
 */

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::shared::ServerConfig;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Parses `database_url` from the configuration
/// 2. Creates the database file if it does not exist
/// 3. Creates the connection pool
/// 4. Runs database migrations
///
/// # Errors
///
/// Unlike optional services, the database is required: any failure here
/// aborts startup.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Create a migrated in-memory database
///
/// The pool holds exactly one connection that never expires, since every
/// SQLite `:memory:` connection is its own database. Used by tests.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
