//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Password hashing algorithm used for new hashes.
///
/// Verification accepts both formats regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    /// bcrypt with [`AuthConfig::bcrypt_cost`].
    #[default]
    Bcrypt,
    /// Argon2id with library defaults.
    Argon2,
}

/// Session token, cookie and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_app_secret")]
    pub app_secret: String,
    /// Session lifetime in days (token expiry and cookie max-age).
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the session cookie `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Algorithm for new password hashes.
    #[serde(default)]
    pub password_algorithm: PasswordAlgorithm,
    /// bcrypt cost factor.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Reset token validity window in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_secret: default_app_secret(),
            session_ttl_days: default_session_ttl_days(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            password_algorithm: PasswordAlgorithm::default(),
            bcrypt_cost: default_bcrypt_cost(),
            reset_token_ttl_minutes: default_reset_ttl(),
        }
    }
}

fn default_app_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl_days() -> u64 {
    365
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_reset_ttl() -> i64 {
    60
}
