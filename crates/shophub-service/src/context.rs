//! Request context carrying the signed-in user, if any.

use shophub_core::error::AppError;
use shophub_entity::user::User;

/// Message returned when an operation needs a session and there is none.
pub const LOGIN_REQUIRED: &str = "You must be logged in to do that!";

/// Context for the current request.
///
/// Built once per request from the session cookie and passed into service
/// methods so that every operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The signed-in user, loaded fresh from the store for this request.
    user: Option<User>,
}

impl RequestContext {
    /// Context for a request without a (valid) session.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context for a request made by `user`.
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the request carries a session.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, or an authentication error.
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::authentication(LOGIN_REQUIRED))
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
