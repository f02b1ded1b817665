//! Workflow monitoring events
//!
//! The EventBus decouples the submission workflows from whoever watches them
//! (log shippers, alerting, tests). Dispatch faults in particular are always
//! published here, whatever the debug setting.
//!
//! # Architecture
//!
//! ```text
//! OrderWorkflow ──┐
//!                 ├──▶ EventBus::publish() ──▶ broadcast channel ──▶ monitors
//! ClubWorkflow ───┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let event_bus = EventBus::new(1024);
//! let mut rx = event_bus.subscribe();
//!
//! if let Ok(envelope) = rx.recv().await {
//!     if let WorkflowEvent::DispatchFailed { recipient, fault, .. } = envelope.event {
//!         alert(recipient, fault);
//!     }
//! }
//! ```

use crate::core::error::DispatchFault;
use crate::core::order::Fulfillment;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Who a notification is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// The person who submitted the form
    Customer,
    /// The bakery's own inbox
    Business,
}

impl Recipient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recipient::Customer => "customer",
            Recipient::Business => "business",
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which submission flow produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Order,
    Club,
}

/// Events emitted by the submission workflows
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// An order was saved; the customer is being redirected to the thanks page
    OrderAccepted {
        order_id: Uuid,
        choice: Fulfillment,
        date_needed: NaiveDate,
    },
    /// A submission failed validation and the form was shown again
    SubmissionRejected { flow: Flow, fields: Vec<String> },
    /// The order store failed; no order exists and no mail was attempted
    PersistenceFailed { message: String },
    /// One notification was not accepted by the mail transport
    DispatchFailed {
        flow: Flow,
        order_id: Option<Uuid>,
        recipient: Recipient,
        fault: DispatchFault,
    },
    /// A club signup was accepted
    ClubJoined,
}

impl WorkflowEvent {
    /// Short event name, matching the serialized tag
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::OrderAccepted { .. } => "order_accepted",
            WorkflowEvent::SubmissionRejected { .. } => "submission_rejected",
            WorkflowEvent::PersistenceFailed { .. } => "persistence_failed",
            WorkflowEvent::DispatchFailed { .. } => "dispatch_failed",
            WorkflowEvent::ClubJoined => "club_joined",
        }
    }
}

/// Envelope wrapping a workflow event with metadata
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: WorkflowEvent,
}

impl EventEnvelope {
    /// Create a new event envelope
    pub fn new(event: WorkflowEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone (the sender is shared) and safe to use from any task.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. With no subscribers the event is dropped.
    /// Returns the number of receivers that will receive the event.
    pub fn publish(&self, event: WorkflowEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
