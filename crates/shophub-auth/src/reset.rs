//! Password reset tokens.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

/// Number of random bytes in a reset token (160 bits).
pub const RESET_TOKEN_BYTES: usize = 20;

/// A freshly issued reset token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    /// Hex-encoded token, 40 characters.
    pub token: String,
    /// Last instant at which the token is still valid.
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Issue a token at `now`, valid for `ttl`.
    pub fn issue_at(now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            token: hex::encode(bytes),
            expires_at: now + ttl,
        }
    }
}
