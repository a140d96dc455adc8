//! Routes Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports
//! ├── router.rs       - Router assembly, CORS and tracing layers
//! ├── api_routes.rs   - Authentication and health routes
//! ├── site_routes.rs  - Site routes
//! └── order_routes.rs - Order routes
//! ```
//!
//! Each `configure_*_routes` function adds one group to the router and puts
//! its protected routes behind the auth middleware.

pub mod router;

pub mod api_routes;

pub mod site_routes;

pub mod order_routes;

pub use router::create_router;
