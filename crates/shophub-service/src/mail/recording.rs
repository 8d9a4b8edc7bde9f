//! In-process transport that keeps every message for later inspection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shophub_core::result::AppResult;

use super::{Mailer, OutgoingMail};

/// Records messages instead of delivering them. Clones share the outbox.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    outbox: Arc<Mutex<Vec<OutgoingMail>>>,
}

impl RecordingMailer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, oldest first.
    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.outbox.lock().await.clone()
    }

    /// The most recent message addressed to `to`.
    pub async fn last_to(&self, to: &str) -> Option<OutgoingMail> {
        self.outbox
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        self.outbox.lock().await.push(mail);
        Ok(())
    }
}
