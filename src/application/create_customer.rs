use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::customer::{Customer, CustomerError, CustomerRepository, Email, NewCustomer};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
}

/// Registers a customer with a unique email address
pub struct CreateCustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CreateCustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn execute(&self, request: CreateCustomerRequest) -> Result<Customer, CustomerError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(CustomerError::EmptyName);
        }

        let email = Email::new(request.email.trim());
        validate_email(&email)?;

        if self.customers.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Email already registered");
            return Err(CustomerError::EmailAlreadyUsed);
        }

        let customer = self
            .customers
            .create(NewCustomer {
                name: name.to_string(),
                email,
            })
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }
}

/// Basic format check, not RFC 5322
fn validate_email(email: &Email) -> Result<(), CustomerError> {
    if email.as_str().is_empty() {
        return Err(CustomerError::EmptyEmail);
    }
    if !email.as_str().contains('@') {
        return Err(CustomerError::InvalidEmail(email.as_str().to_string()));
    }
    Ok(())
}
