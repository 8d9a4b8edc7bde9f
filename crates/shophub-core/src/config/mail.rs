//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// How outgoing mail is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Write messages to the log instead of sending them.
    #[default]
    Log,
    /// Relay through an SMTP server.
    Smtp,
}

/// SMTP relay and sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Delivery mechanism.
    #[serde(default)]
    pub transport: MailTransport,
    /// SMTP relay host.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default, skip_serializing)]
    pub smtp_password: String,
    /// Fixed sender address of every outgoing message.
    #[serde(default = "default_from")]
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from() -> String {
    "no-reply@shophub.dev".to_string()
}
