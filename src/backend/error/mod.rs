//! Backend Error Module
//!
//! Errors returned by HTTP handlers. Every error converts into an HTTP
//! response carrying the JSON envelope, so handlers return
//! `Result<_, BackendError>` and use `?` freely.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions and status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{is_unique_violation, BackendError};
