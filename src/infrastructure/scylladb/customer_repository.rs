use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;
use scylla::statement::batch::Batch;
use uuid::Uuid;

use super::rows_or_none;
use crate::domain::customer::{Customer, CustomerId, CustomerRepository, Email, NewCustomer};

type CustomerRow = (String, String, String, DateTime<Utc>);

pub struct ScyllaCustomerRepository {
    session: Arc<Session>,
}

impl ScyllaCustomerRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

fn customer_from_row((id, name, email, created_at): CustomerRow) -> Customer {
    Customer {
        id: CustomerId(id),
        name,
        email: Email(email),
        created_at,
    }
}

#[async_trait]
impl CustomerRepository for ScyllaCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT id, name, email, created_at FROM customers WHERE id = ?",
                (id.as_str(),),
            )
            .await?;

        let Some(rows_result) = rows_or_none(result)? else {
            return Ok(None);
        };

        let customer = rows_result.maybe_first_row::<CustomerRow>()?.map(customer_from_row);

        tracing::debug!(customer_id = %id, found = customer.is_some(), "Looked up customer");
        Ok(customer)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT customer_id FROM customers_by_email WHERE email = ?",
                (email.as_str(),),
            )
            .await?;

        let Some(rows_result) = rows_or_none(result)? else {
            return Ok(None);
        };

        match rows_result.maybe_first_row::<(String,)>()? {
            Some((customer_id,)) => self.find_by_id(&CustomerId(customer_id)).await,
            None => Ok(None),
        }
    }

    async fn create(&self, customer: NewCustomer) -> Result<Customer> {
        let customer = Customer {
            id: CustomerId(Uuid::new_v4().to_string()),
            name: customer.name,
            email: customer.email,
            created_at: Utc::now(),
        };

        let mut batch = Batch::default();
        batch.append_statement("INSERT INTO customers (id, name, email, created_at) VALUES (?, ?, ?, ?)");
        batch.append_statement("INSERT INTO customers_by_email (email, customer_id) VALUES (?, ?)");

        self.session
            .batch(
                &batch,
                (
                    (
                        customer.id.as_str(),
                        customer.name.as_str(),
                        customer.email.as_str(),
                        customer.created_at,
                    ),
                    (customer.email.as_str(), customer.id.as_str()),
                ),
            )
            .await?;

        tracing::info!(customer_id = %customer.id, "Persisted customer");
        Ok(customer)
    }
}
