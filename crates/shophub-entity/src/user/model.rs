//! User entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use shophub_core::types::UserId;

use super::permission::{Permission, PermissionSet};

/// A registered shopper or administrator.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name given at signup.
    pub name: String,
    /// Lowercased, unique e-mail address.
    pub email: String,
    /// Salted password hash (bcrypt or Argon2id PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Granted capabilities.
    pub permissions: PermissionSet,
    /// Pending password reset token.
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// When the pending reset token stops being accepted.
    #[serde(skip_serializing)]
    pub reset_token_expiry: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether the user holds a specific permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Whether a reset token is pending and still valid at `now`.
    pub fn reset_token_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, self.reset_token_expiry) {
            (Some(stored), Some(expiry)) => stored == token && expiry >= now,
            _ => false,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// E-mail; callers lowercase it before handing it to the store.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial permissions.
    pub permissions: PermissionSet,
}

/// Normalize an e-mail address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
