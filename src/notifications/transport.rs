//! Mail transport abstraction
//!
//! A transport takes one fully formed [`Message`] and reports whether the
//! provider accepted it. Failures are classified into [`DispatchFault`] by the
//! transport itself; the dispatcher adds timeouts and header checks on top.

use super::message::Message;
use crate::core::error::DispatchFault;
use async_trait::async_trait;

/// An external mail-sending collaborator (SMTP relay, provider API, log sink)
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand one message to the provider
    async fn send(&self, message: &Message) -> Result<(), DispatchFault>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Development transport that writes messages to the log instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, message: &Message) -> Result<(), DispatchFault> {
        tracing::info!(
            from = %message.from,
            to = ?message.to,
            subject = %message.subject,
            "mail (log backend)"
        );
        tracing::debug!(body = %message.text_body, "mail body");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
