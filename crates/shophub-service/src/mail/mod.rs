//! Outbound mail.
//!
//! Services talk to a [`Mailer`]; the transport behind it is chosen from
//! [`MailConfig::transport`] at startup.

pub mod logging;
pub mod recording;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;

use shophub_core::config::{MailConfig, MailTransport};
use shophub_core::result::AppResult;

pub use logging::LogMailer;
pub use recording::RecordingMailer;
pub use smtp::SmtpMailer;

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text alternative.
    pub text_body: String,
    /// HTML alternative.
    pub html_body: String,
}

/// Delivers [`OutgoingMail`] from the configured fixed sender.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message.
    async fn send(&self, mail: OutgoingMail) -> AppResult<()>;
}

/// Build the mailer selected by configuration.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.transport {
        MailTransport::Log => Ok(Arc::new(LogMailer::new(config))),
        MailTransport::Smtp => Ok(Arc::new(SmtpMailer::new(config)?)),
    }
}
