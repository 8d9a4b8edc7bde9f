//! Session token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use shophub_core::config::AuthConfig;
use shophub_core::error::AppError;
use shophub_core::types::UserId;

use super::claims::Claims;

/// Creates signed session tokens (HS256).
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session lifetime in days.
    ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_days", &self.ttl_days)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.app_secret.as_bytes()),
            ttl_days: config.session_ttl_days as i64,
        }
    }

    /// Issues a session token for `user_id`, valid from now.
    pub fn issue(&self, user_id: UserId) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a session token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let exp = now + Duration::days(self.ttl_days);
        let claims = Claims {
            sub: user_id.into_uuid(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok((token, exp))
    }
}
