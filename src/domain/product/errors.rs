use super::value_objects::Price;

// ============================================================================
// Product Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("There is already a product with this name")]
    AlreadyExists,

    #[error("Invalid product price: {0}")]
    NegativePrice(Price),

    #[error("Invalid product quantity: {0}")]
    NegativeQuantity(i32),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl ProductError {
    /// True for business rule violations, false for store failures
    pub fn is_application_error(&self) -> bool {
        !matches!(self, ProductError::Repository(_))
    }
}
