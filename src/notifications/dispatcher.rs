//! Sends composed notifications and reports each outcome separately
//!
//! The customer and business messages are sent concurrently. A failure on
//! one side never prevents the attempt on the other, and every send is
//! bounded by the configured timeout.

use super::message::{ComposedMessages, Message};
use super::transport::MailTransport;
use crate::core::error::DispatchFault;
use crate::core::events::Recipient;
use crate::core::validation::validators::email;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one dispatch, per recipient class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub customer: Result<(), DispatchFault>,
    pub business: Result<(), DispatchFault>,
}

impl DispatchReport {
    /// Report where neither message could be attempted
    pub fn not_sent(fault: DispatchFault) -> Self {
        Self {
            customer: Err(fault.clone()),
            business: Err(fault),
        }
    }

    pub fn get(&self, recipient: Recipient) -> &Result<(), DispatchFault> {
        match recipient {
            Recipient::Customer => &self.customer,
            Recipient::Business => &self.business,
        }
    }

    /// Whether both messages were accepted by the transport
    pub fn all_delivered(&self) -> bool {
        self.customer.is_ok() && self.business.is_ok()
    }

    /// Every failed recipient with its fault
    pub fn faults(&self) -> Vec<(Recipient, &DispatchFault)> {
        [Recipient::Customer, Recipient::Business]
            .into_iter()
            .filter_map(|recipient| match self.get(recipient) {
                Ok(()) => None,
                Err(fault) => Some((recipient, fault)),
            })
            .collect()
    }
}

/// Hands composed messages to a [`MailTransport`]
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn MailTransport>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Send both messages and report each result independently
    pub async fn dispatch(&self, messages: &ComposedMessages) -> DispatchReport {
        let (customer, business) = futures::join!(
            self.send_one(Recipient::Customer, &messages.customer),
            self.send_one(Recipient::Business, &messages.business),
        );
        DispatchReport { customer, business }
    }

    /// Send one message, bounded by the dispatcher timeout
    pub async fn send_one(
        &self,
        recipient: Recipient,
        message: &Message,
    ) -> Result<(), DispatchFault> {
        let result = match check_headers(message) {
            Ok(()) => tokio::time::timeout(self.timeout, self.transport.send(message))
                .await
                .unwrap_or(Err(DispatchFault::Timeout {
                    after_ms: self.timeout.as_millis() as u64,
                })),
            Err(fault) => Err(fault),
        };

        match &result {
            Ok(()) => tracing::debug!(
                recipient = %recipient,
                transport = self.transport.name(),
                "notification accepted"
            ),
            Err(fault) => tracing::warn!(
                recipient = %recipient,
                transport = self.transport.name(),
                fault = fault.kind(),
                error = %fault,
                "notification not delivered"
            ),
        }
        result
    }
}

/// Reject addresses the transport would choke on before calling it
fn check_headers(message: &Message) -> Result<(), DispatchFault> {
    if message.to.is_empty() {
        return Err(DispatchFault::MalformedHeader {
            message: "no recipients".to_string(),
        });
    }

    let validate = email();
    let addresses = message
        .to
        .iter()
        .map(|to| ("to", to.as_str()))
        .chain(std::iter::once(("from", message.from.as_str())))
        .chain(message.reply_to.as_deref().map(|r| ("reply_to", r)));

    for (header, address) in addresses {
        if address.is_empty() || validate(header, address).is_err() {
            return Err(DispatchFault::MalformedHeader {
                message: format!("invalid {} address '{}'", header, address),
            });
        }
    }
    Ok(())
}
