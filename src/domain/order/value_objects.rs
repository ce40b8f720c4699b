use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerId};
use crate::domain::product::{Price, ProductId};

// ============================================================================
// Order Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One product/quantity pair requested by the customer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RequestedItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl RequestedItem {
    pub fn new(product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }
}

/// Input of the create-order use case
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub items: Vec<RequestedItem>,
}

/// Priced line of a persisted order.
/// `price` is the catalog price captured when the order was created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub price: Price,
    pub quantity: i32,
}

impl OrderLineItem {
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Order data handed to the order store
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: Customer,
    pub items: Vec<OrderLineItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub items: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn total(&self) -> Price {
        self.items.iter().map(OrderLineItem::subtotal).sum()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
