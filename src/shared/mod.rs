//! Shared Module
//!
//! Types that make up the HTTP API: request and response bodies, the response
//! envelope, validation errors, geographic helpers and server configuration.
//! Nothing here touches the database or the HTTP stack.

/// Shared error types
pub mod error;

/// Response envelope
pub mod response;

/// GeoJSON points and distance math
pub mod geo;

/// Site wire types
pub mod site;

/// Order wire types and pricing
pub mod order;

/// Server configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use response::{ApiResponse, ApiStatus};
pub use geo::GeoPoint;
pub use site::{Material, MaterialMap, Site};
pub use order::{Order, OrderStatus};
pub use config::{ServerConfig, ServerConfigBuilder, ConfigError};
