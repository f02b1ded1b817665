//! In-memory implementation of OrderStore for testing and development

use crate::core::error::StoreError;
use crate::core::order::{NewOrder, Order};
use crate::core::service::OrderStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory order store
///
/// Orders are kept in insertion order behind a single lock, so each create
/// is atomic and `created` never goes backwards.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Create a new, empty in-memory order store
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(operation: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::OperationFailed {
        operation: operation.to_string(),
        message: format!("Failed to acquire lock: {}", e),
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(|e| lock_error("create", e))?;

        let now = Utc::now();
        let created = match orders.last() {
            Some(last) if last.created > now => last.created,
            _ => now,
        };
        let order = Order::from_new(order, Uuid::new_v4(), created);
        orders.push(order.clone());

        Ok(order)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|e| lock_error("get", e))?;

        Ok(orders.iter().find(|order| &order.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|e| lock_error("list", e))?;

        Ok(orders.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let orders = self.orders.read().map_err(|e| lock_error("count", e))?;

        Ok(orders.len())
    }
}
