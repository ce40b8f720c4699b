// ============================================================================
// Infrastructure - Repository implementations
// ============================================================================

pub mod memory;
pub mod scylladb;

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::domain::customer::CustomerRepository;
use crate::domain::order::OrderRepository;
use crate::domain::product::ProductRepository;

/// The three stores the use cases depend on
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(memory::InMemoryCustomerRepository::new()),
            products: Arc::new(memory::InMemoryProductRepository::new()),
            orders: Arc::new(memory::InMemoryOrderRepository::new()),
        }
    }

    /// Build repositories for the configured storage backend
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.storage {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory repositories");
                Ok(Self::in_memory())
            }
            StorageBackend::Scylla => {
                let session = scylladb::connect(config).await?;
                Ok(Self {
                    customers: Arc::new(scylladb::ScyllaCustomerRepository::new(session.clone())),
                    products: Arc::new(scylladb::ScyllaProductRepository::new(session.clone())),
                    orders: Arc::new(scylladb::ScyllaOrderRepository::new(session)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::application::{
        CreateCustomerRequest, CreateCustomerService, CreateOrderService, CreateProductRequest,
        CreateProductService, FindOrderService,
    };
    use crate::domain::order::{OrderRequest, RequestedItem};
    use crate::domain::product::Price;

    #[tokio::test]
    async fn test_memory_backend_end_to_end() {
        let config = Config::try_parse_from(["order-service", "--storage", "memory"]).unwrap();
        let repos = Repositories::from_config(&config).await.unwrap();

        let customer = CreateCustomerService::new(repos.customers.clone())
            .execute(CreateCustomerRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap();
        let product = CreateProductService::new(repos.products.clone())
            .execute(CreateProductRequest {
                name: "Keyboard".to_string(),
                price: Price::from_cents(8990),
                quantity: 5,
            })
            .await
            .unwrap();

        let order = CreateOrderService::new(
            repos.orders.clone(),
            repos.products.clone(),
            repos.customers.clone(),
        )
        .execute(OrderRequest {
            customer_id: customer.id.clone(),
            items: vec![RequestedItem {
                product_id: product.id.clone(),
                quantity: 2,
            }],
        })
        .await
        .unwrap();

        let stored = FindOrderService::new(repos.orders.clone())
            .execute(order.id)
            .await
            .unwrap();

        assert_eq!(stored.customer, customer);
        assert_eq!(stored.items[0].price, Price::from_cents(8990));
        assert_eq!(stored.total(), Price::from_cents(17980));
    }
}
