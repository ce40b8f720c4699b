use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerId, CustomerRepository, Email, NewCustomer};
use crate::domain::order::{NewOrder, Order, OrderId, OrderRepository};
use crate::domain::product::{CatalogProduct, NewProduct, ProductId, ProductRepository};

// ============================================================================
// In-Memory Repositories
// ============================================================================
//
// Process-local stores backed by `RwLock<HashMap<..>>`. Used by the demo
// binary when no database is configured and as test doubles.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let customers = customers
            .into_iter()
            .map(|customer| (customer.id.clone(), customer))
            .collect();
        Self {
            customers: RwLock::new(customers),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| &c.email == email).cloned())
    }

    async fn create(&self, customer: NewCustomer) -> Result<Customer> {
        let customer = Customer {
            id: CustomerId::new(Uuid::new_v4().to_string()),
            name: customer.name,
            email: customer.email,
            created_at: Utc::now(),
        };

        self.customers
            .write()
            .await
            .insert(customer.id.clone(), customer.clone());

        tracing::debug!(customer_id = %customer.id, "Stored customer in memory");
        Ok(customer)
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Option<Vec<CatalogProduct>>> {
        let products = self.products.read().await;
        let found = ids.iter().filter_map(|id| products.get(id).cloned()).collect();
        Ok(Some(found))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogProduct>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<CatalogProduct> {
        let product = CatalogProduct {
            id: ProductId::new(Uuid::new_v4().to_string()),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        };

        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());

        tracing::debug!(product_id = %product.id, "Stored product in memory");
        Ok(product)
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders written so far
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let order = Order {
            id: OrderId::new(),
            customer: order.customer,
            items: order.items,
            created_at: Utc::now(),
        };

        self.orders.write().await.insert(order.id, order.clone());

        tracing::debug!(order_id = %order.id, "Stored order in memory");
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(id).cloned())
    }
}
