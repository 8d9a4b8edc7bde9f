//! Rendered message bodies.

use askama::Template;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;

use super::OutgoingMail;

/// Subject line of the password reset message.
pub const PASSWORD_RESET_SUBJECT: &str = "Your Password Reset Token";

#[derive(Template)]
#[template(path = "email/password_reset.html")]
struct PasswordResetHtml<'a> {
    name: &'a str,
    reset_link: &'a str,
}

#[derive(Template)]
#[template(path = "email/password_reset.txt")]
struct PasswordResetText<'a> {
    name: &'a str,
    reset_link: &'a str,
}

/// Render the password reset message for `to`.
pub fn password_reset(to: &str, name: &str, reset_link: &str) -> AppResult<OutgoingMail> {
    let html_body = PasswordResetHtml { name, reset_link }
        .render()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to render email", e))?;
    let text_body = PasswordResetText { name, reset_link }
        .render()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to render email", e))?;

    Ok(OutgoingMail {
        to: to.to_string(),
        subject: PASSWORD_RESET_SUBJECT.to_string(),
        text_body,
        html_body,
    })
}
