//! Signup, signin, signout, password reset, and session resolution.

pub mod service;

pub use service::{
    AuthService, AuthSession, ResetPasswordRequest, SignupRequest, SuccessMessage,
};
