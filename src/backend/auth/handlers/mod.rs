//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request and response types
//! ├── register.rs  - POST /register
//! ├── login.rs     - POST /login
//! ├── me.rs        - GET /auth
//! └── logout.rs    - POST /logout
//! ```
//!
//! Register and login both set the `token` cookie and also return the
//! token in the body.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Session check handler
pub mod me;

/// Logout handler
pub mod logout;

pub use types::{AuthData, LoginRequest, RegisterRequest, UserProfile};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
