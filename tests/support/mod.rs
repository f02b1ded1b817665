//! Shared fakes for the integration tests
//!
//! - `RecordingTransport` keeps every message it accepts and can be told to
//!   fail for specific recipients
//! - `FailingStore` rejects every write, like a locked or unreachable database

#![allow(dead_code)]

use async_trait::async_trait;
use honeybee::config::AppConfig;
use honeybee::core::{DispatchFault, NewOrder, Order, OrderForm, OrderStore, StoreError};
use honeybee::notifications::{MailTransport, Message};
use honeybee::orders::AppState;
use honeybee::server::ServerBuilder;
use honeybee::storage::InMemoryOrderStore;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const SHOP_FROM: &str = "hello@honeybee.test";
pub const SHOP_INBOX: &str = "kitchen@honeybee.test";

#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Message>>>,
    failing: Arc<Mutex<Vec<String>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that refuses every message addressed to `address`
    pub fn failing_for(address: &str) -> Self {
        let transport = Self::new();
        transport.failing.lock().unwrap().push(address.to_string());
        transport
    }

    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<Message> {
        self.sent()
            .into_iter()
            .filter(|message| message.to.iter().any(|to| to == address))
            .collect()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: &Message) -> Result<(), DispatchFault> {
        let refused = {
            let failing = self.failing.lock().unwrap();
            message.to.iter().any(|to| failing.contains(to))
        };
        if refused {
            return Err(DispatchFault::Connection {
                message: "connection refused".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

pub struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
    async fn create(&self, _order: NewOrder) -> Result<Order, StoreError> {
        Err(StoreError::OperationFailed {
            operation: "create".to_string(),
            message: "database is locked".to_string(),
        })
    }

    async fn get(&self, _id: &Uuid) -> Result<Option<Order>, StoreError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(Vec::new())
    }
}

/// The order from the bakery's reference scenario
pub fn ada_form() -> OrderForm {
    OrderForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-1212".to_string(),
        choice: "D".to_string(),
        date_needed: "2025-12-24".to_string(),
        details: "2 dozen sugar cookies".to_string(),
    }
}

pub fn config() -> AppConfig {
    AppConfig {
        default_from_email: SHOP_FROM.to_string(),
        business_email: SHOP_INBOX.to_string(),
        ..AppConfig::for_testing()
    }
}

/// Handler state over an in-memory store and a recording transport
pub fn state(store: InMemoryOrderStore, transport: RecordingTransport) -> AppState {
    ServerBuilder::new()
        .with_config(config())
        .with_order_store(store)
        .with_transport(transport)
        .build_state()
        .expect("Failed to build state")
}
