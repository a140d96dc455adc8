//! Backend Module
//!
//! All server-side code: an Axum HTTP server over a SQLite database.
//!
//! # Architecture
//!
//! - **`server`** - Application state, database setup, app creation
//! - **`routes`** - Route groups and router assembly
//! - **`auth`** - Users, session tokens, register/login/logout handlers
//! - **`sites`** - Site storage, proximity search and handlers
//! - **`orders`** - Order storage and handlers
//! - **`health`** - Liveness endpoint
//! - **`middleware`** - Session verification and JSON body extraction
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── sites/          - Sites and proximity search
//! ├── orders/         - Orders
//! ├── health.rs       - Health check
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. `TraceLayer` opens a span, `CorsLayer` answers preflights
//! 2. Protected routes run `auth_middleware`, which attaches the user
//! 3. The handler validates input, calls the data layer and wraps the
//!    result in `ApiResponse`
//! 4. Errors convert to the same envelope through `BackendError`
//!
//! # Persistence
//!
//! SQLite through `sqlx`. Migrations in `migrations/` run at startup.
//! Multi-row invariants (ownership, participant visibility) are enforced in
//! the `WHERE` clause of the single statement that reads or writes.

/// Server initialization and state management
pub mod server;

/// HTTP route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Sites and proximity search
pub mod sites;

/// Orders
pub mod orders;

/// Health check
pub mod health;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;

// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
