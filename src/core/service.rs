//! Service trait for order persistence

use crate::core::error::StoreError;
use crate::core::order::{NewOrder, Order};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage for submitted orders
///
/// Implementations assign `id` and `created` on [`create`](Self::create).
/// A create is atomic: either the whole order is visible to later reads or
/// none of it is. Orders are never updated or deleted through this trait.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a validated order and return it with its generated fields
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Get an order by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Order>, StoreError>;

    /// List all orders, oldest first
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Number of stored orders
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list().await?.len())
    }
}
