//! Server Module
//!
//! Startup plumbing for the Axum HTTP server.
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - Database pool creation and migrations
//! - **`init`** - App creation from a `ServerConfig`
//!
//! # Initialization Flow
//!
//! 1. `ServerConfig::from_env` in the binary
//! 2. `load_database` opens the SQLite pool and runs migrations
//! 3. `create_router` wires routes and layers around the shared state

/// Application state management
pub mod state;

/// Database setup
pub mod config;

/// Server initialization
pub mod init;

pub use config::{load_database, memory_pool};
pub use init::create_app;
pub use state::AppState;
