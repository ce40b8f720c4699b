use anyhow::Result;
use async_trait::async_trait;

use super::value_objects::{Customer, CustomerId, Email, NewCustomer};

/// Customer store port
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>>;

    /// Persist a new customer and return it with its assigned id
    async fn create(&self, customer: NewCustomer) -> Result<Customer>;
}
