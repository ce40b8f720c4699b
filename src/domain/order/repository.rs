use anyhow::Result;
use async_trait::async_trait;

use super::value_objects::{NewOrder, Order, OrderId};

/// Order store port
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order. Every call creates a distinct order.
    async fn create(&self, order: NewOrder) -> Result<Order>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>>;
}
