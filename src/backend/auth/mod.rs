//! Authentication Module
//!
//! User accounts, session tokens and the HTTP handlers built on them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports
//! ├── users.rs     - User model and database operations
//! ├── sessions.rs  - JWT tokens and the session cookie
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: details validated, password hashed, user stored, token issued
//! 2. **Login**: credentials verified, token issued
//! 3. **Session check**: token verified by the middleware, profile returned
//! 4. **Logout**: cookie cleared
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt at the configured cost
//! - Tokens are stateless HS256 JWTs with a configurable lifetime
//! - Invalid credentials return 401 without saying which part was wrong

/// User model and database operations
pub mod users;

/// JWT tokens and cookies
pub mod sessions;

/// HTTP handlers
pub mod handlers;

pub use handlers::{get_me, login, logout, register};
