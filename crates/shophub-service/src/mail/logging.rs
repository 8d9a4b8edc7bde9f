//! Development transport that writes messages to the log.

use async_trait::async_trait;
use tracing::info;

use shophub_core::config::MailConfig;
use shophub_core::result::AppResult;

use super::{Mailer, OutgoingMail};

/// Logs every message instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    /// Create a log mailer using the configured sender.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from_address: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.text_body,
            "Mail not delivered (log transport)"
        );
        Ok(())
    }
}
