/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login and session
 * check handlers. Field names are camelCase on the wire.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::SharedError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Register request
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    /// Plain password, hashed before storage
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl RegisterRequest {
    /// Check the fields a new account needs
    pub fn validate(&self) -> Result<(), SharedError> {
        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email format"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(SharedError::validation(field, format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user (no password hash)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

/// Data returned by register and login
///
/// The token is also set as the `token` cookie; it is repeated in the body
/// for clients that send `Authorization: Bearer` instead.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthData {
    pub user: UserProfile,
    pub token: String,
}
