//! Middleware Module
//!
//! Request processing shared by many handlers.
//!
//! - **`auth`** - Session verification for protected routes
//! - **`json`** - JSON body extractor with enveloped rejections

pub mod auth;
pub mod json;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use json::ApiJson;
