//! Authentication service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use shophub_auth::jwt::{JwtDecoder, JwtEncoder};
use shophub_auth::password::PasswordHasher;
use shophub_auth::reset::ResetToken;
use shophub_core::config::{AuthConfig, FrontendConfig};
use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_database::UserRepository;
use shophub_entity::user::{NewUser, PermissionSet, User, normalize_email};

use crate::context::RequestContext;
use crate::mail::{Mailer, templates};

/// Returned by `signout`.
pub const SIGNOUT_MESSAGE: &str = "Goodbye!";
/// Returned by `request_password_reset`.
pub const RESET_REQUESTED_MESSAGE: &str = "Thanks!";
/// Rejection for unknown, consumed or expired reset tokens.
pub const INVALID_RESET_TOKEN: &str = "This token is either invalid or expired";

/// A signed-in user together with the session token to hand back as a cookie.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Signed session token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// A plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    /// Human-readable message.
    pub message: String,
}

impl SuccessMessage {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Signup payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// E-mail address; lowercased before storage.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password reset payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Token from the reset e-mail.
    pub reset_token: String,
    /// New plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
}

/// Handles credentials, session tokens and password resets.
#[derive(Clone)]
pub struct AuthService {
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session token encoder.
    encoder: Arc<JwtEncoder>,
    /// Session token decoder.
    decoder: Arc<JwtDecoder>,
    /// Outbound mail.
    mailer: Arc<dyn Mailer>,
    /// Where reset links point.
    frontend: FrontendConfig,
    /// Reset token validity window.
    reset_ttl: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("frontend", &self.frontend.url)
            .field("reset_ttl", &self.reset_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service. The signing secret and frontend URL come
    /// from configuration.
    pub fn new(
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn Mailer>,
        auth: &AuthConfig,
        frontend: &FrontendConfig,
    ) -> Self {
        Self {
            users,
            hasher: Arc::new(PasswordHasher::new(auth)),
            encoder: Arc::new(JwtEncoder::new(auth)),
            decoder: Arc::new(JwtDecoder::new(auth)),
            mailer,
            frontend: frontend.clone(),
            reset_ttl: Duration::minutes(auth.reset_token_ttl_minutes),
        }
    }

    /// Registers a new user with permissions `{USER}` and signs them in.
    pub async fn signup(&self, req: SignupRequest) -> AppResult<AuthSession> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid signup: {e}")))?;

        let email = normalize_email(&req.email);
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&NewUser {
                name: req.name.trim().to_string(),
                email,
                password_hash,
                permissions: PermissionSet::new_user(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User signed up");
        self.open_session(user)
    }

    /// Verifies credentials and signs the user in.
    pub async fn signin(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No such user found for email {email}")))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Signin rejected: wrong password");
            return Err(AppError::authentication("Invalid password"));
        }

        info!(user_id = %user.id, "User signed in");
        self.open_session(user)
    }

    /// Signing out only clears the cookie; it always succeeds.
    pub fn signout(&self) -> SuccessMessage {
        SuccessMessage::new(SIGNOUT_MESSAGE)
    }

    /// Issues a reset token and mails the reset link.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<SuccessMessage> {
        self.request_password_reset_at(email, Utc::now()).await
    }

    /// [`Self::request_password_reset`] as if the current time were `now`.
    pub async fn request_password_reset_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<SuccessMessage> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No such user found for email {email}")))?;

        let reset = ResetToken::issue_at(now, self.reset_ttl);
        let user = self
            .users
            .set_reset_token(user.id, &reset.token, reset.expires_at)
            .await?;

        let link = self.frontend.reset_link(&reset.token);
        let mail = templates::password_reset(&user.email, &user.name, &link)?;
        self.mailer.send(mail).await?;

        info!(user_id = %user.id, expires_at = %reset.expires_at, "Password reset requested");
        Ok(SuccessMessage::new(RESET_REQUESTED_MESSAGE))
    }

    /// Consumes a reset token, sets the new password and signs the user in.
    pub async fn reset_password(&self, req: ResetPasswordRequest) -> AppResult<AuthSession> {
        self.reset_password_at(req, Utc::now()).await
    }

    /// [`Self::reset_password`] as if the current time were `now`.
    pub async fn reset_password_at(
        &self,
        req: ResetPasswordRequest,
        now: DateTime<Utc>,
    ) -> AppResult<AuthSession> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid password reset: {e}")))?;
        if req.password != req.confirm_password {
            return Err(AppError::validation("Passwords don't match"));
        }

        let user = self
            .users
            .find_by_reset_token(&req.reset_token, now)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_RESET_TOKEN))?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        // A concurrent reset may have consumed the token since the lookup.
        let user = self
            .users
            .complete_password_reset(user.id, &req.reset_token, now, &password_hash)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_RESET_TOKEN))?;

        info!(user_id = %user.id, "Password reset completed");
        self.open_session(user)
    }

    /// Turns an optional session token into a request context. Missing,
    /// malformed, expired or orphaned tokens all yield an anonymous context.
    pub async fn resolve_session(&self, token: Option<&str>) -> AppResult<RequestContext> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(RequestContext::anonymous());
        };

        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Ignoring invalid session token");
                return Ok(RequestContext::anonymous());
            }
        };

        match self.users.find_by_id(claims.user_id()).await? {
            Some(user) => Ok(RequestContext::authenticated(user)),
            None => {
                debug!(user_id = %claims.user_id(), "Session token for unknown user");
                Ok(RequestContext::anonymous())
            }
        }
    }

    fn open_session(&self, user: User) -> AppResult<AuthSession> {
        let (token, expires_at) = self.encoder.issue(user.id)?;
        Ok(AuthSession {
            user,
            token,
            expires_at,
        })
    }
}
