//! ReGain - Main Library
//!
//! ReGain is a marketplace backend that connects construction sites holding
//! surplus building materials with buyers nearby.
//!
//! # Overview
//!
//! This library provides:
//! - Account registration and cookie/JWT sessions
//! - Site listings with owner-scoped management
//! - Proximity search over active sites
//! - Order placement with server-side pricing and a seller status workflow
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types, the response envelope, geo helpers,
//!   validation errors and server configuration. No I/O.
//! - **`backend`** - Axum HTTP server, SQLite data access, handlers,
//!   middleware and routing.
//!
//! # Usage
//!
//! ```rust,no_run
//! use regain::backend::server::init::create_app;
//! use regain::shared::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for request validation
//! - `backend::error::BackendError` for everything a handler can return;
//!   it renders as the JSON envelope with a matching HTTP status

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
