use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;
use scylla::statement::batch::Batch;
use uuid::Uuid;

use super::rows_or_none;
use crate::domain::customer::{Customer, CustomerId, Email};
use crate::domain::order::{NewOrder, Order, OrderCreated, OrderId, OrderLineItem, OrderRepository};

type OrderRow = (Uuid, String, String, String, DateTime<Utc>, String, DateTime<Utc>);

// ============================================================================
// Order Store - orders table + transactional outbox
// ============================================================================
//
// The order row and its OrderCreated outbox message are written in one
// batch: either both are persisted or neither is.
//
// ============================================================================

pub struct ScyllaOrderRepository {
    session: Arc<Session>,
}

impl ScyllaOrderRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

fn order_from_row(row: OrderRow) -> Result<Order> {
    let (id, customer_id, customer_name, customer_email, customer_created_at, items_json, created_at) = row;
    let items: Vec<OrderLineItem> = serde_json::from_str(&items_json)?;

    Ok(Order {
        id: OrderId(id),
        customer: Customer {
            id: CustomerId(customer_id),
            name: customer_name,
            email: Email(customer_email),
            created_at: customer_created_at,
        },
        items,
        created_at,
    })
}

#[async_trait]
impl OrderRepository for ScyllaOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let order = Order {
            id: OrderId::new(),
            customer: order.customer,
            items: order.items,
            created_at: Utc::now(),
        };

        let event = OrderCreated::from_order(&order);
        let event_id = Uuid::new_v4();
        let items_json = serde_json::to_string(&order.items)?;
        let payload = serde_json::to_string(&event)?;

        let mut batch = Batch::default();
        batch.append_statement(
            "INSERT INTO orders (
                id, customer_id, customer_name, customer_email, customer_created_at,
                items, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        );
        batch.append_statement(
            "INSERT INTO outbox_messages (id, aggregate_id, event_type, topic, payload, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        );

        tracing::debug!(
            order_id = %order.id,
            event_id = %event_id,
            "Persisting order with outbox event"
        );

        self.session
            .batch(
                &batch,
                (
                    (
                        order.id.0,
                        order.customer.id.as_str(),
                        order.customer.name.as_str(),
                        order.customer.email.as_str(),
                        order.customer.created_at,
                        items_json,
                        order.created_at,
                    ),
                    (
                        event_id,
                        order.id.0,
                        OrderCreated::EVENT_TYPE,
                        OrderCreated::TOPIC,
                        payload,
                        order.created_at,
                    ),
                ),
            )
            .await?;

        tracing::info!(
            order_id = %order.id,
            event_id = %event_id,
            item_count = order.items.len(),
            "Persisted order and outbox event"
        );

        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT id, customer_id, customer_name, customer_email, customer_created_at,
                        items, created_at
                 FROM orders WHERE id = ?",
                (id.0,),
            )
            .await?;

        let Some(rows_result) = rows_or_none(result)? else {
            return Ok(None);
        };

        match rows_result.maybe_first_row::<OrderRow>()? {
            Some(row) => Ok(Some(order_from_row(row)?)),
            None => Ok(None),
        }
    }
}
