use std::sync::Arc;

use crate::domain::order::{Order, OrderError, OrderId, OrderRepository};

pub struct FindOrderService {
    orders: Arc<dyn OrderRepository>,
}

impl FindOrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn execute(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .find_by_id(&id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }
}
