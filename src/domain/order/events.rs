use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;
use super::value_objects::{Order, OrderId, OrderLineItem};

// ============================================================================
// Order Events - written to the outbox alongside the order row
// ============================================================================

/// Order Created - emitted once per persisted order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
}

impl OrderCreated {
    pub const EVENT_TYPE: &'static str = "OrderCreated";
    pub const TOPIC: &'static str = "order-events";

    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id,
            customer_id: order.customer.id.clone(),
            items: order.items.clone(),
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::{Customer, Email};
    use crate::domain::product::{Price, ProductId};

    #[test]
    fn test_event_from_order() {
        let order = Order {
            id: OrderId::new(),
            customer: Customer {
                id: CustomerId::new("C1"),
                name: "Ada".to_string(),
                email: Email::new("ada@example.com"),
                created_at: Utc::now(),
            },
            items: vec![OrderLineItem {
                product_id: ProductId::new("P1"),
                price: Price::from_cents(1000),
                quantity: 5,
            }],
            created_at: Utc::now(),
        };

        let event = OrderCreated::from_order(&order);
        assert_eq!(event.order_id, order.id);
        assert_eq!(event.customer_id, CustomerId::new("C1"));
        assert_eq!(event.items, order.items);

        let payload = serde_json::to_value(&event).unwrap();
        assert_eq!(payload["items"][0]["price"], 1000);
        assert_eq!(payload["items"][0]["product_id"], "P1");
    }
}
