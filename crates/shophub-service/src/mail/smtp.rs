//! SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use shophub_core::config::MailConfig;
use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;

use super::{Mailer, OutgoingMail};

/// Sends multipart (text + HTML) mail through a STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpMailer {
    /// Create an SMTP mailer from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let from = config.from_address.parse::<Mailbox>().map_err(|e| {
            AppError::configuration(format!(
                "Invalid mail.from_address '{}': {e}",
                config.from_address
            ))
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid SMTP relay", e)
            })?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        let to = mail
            .to
            .parse::<Mailbox>()
            .map_err(|_| AppError::validation(format!("Invalid email address: {}", mail.to)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&mail.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(mail.html_body),
                    ),
            )
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build email", e))?;

        self.transport.send(message).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to send email", e)
        })?;

        info!(to = %mail.to, subject = %mail.subject, "Email sent");
        Ok(())
    }
}
