use crate::domain::customer::CustomerId;
use crate::domain::product::ProductId;
use super::value_objects::OrderId;

// ============================================================================
// Order Business Rule Errors
// ============================================================================
//
// Message texts are part of the public contract and must stay as they are.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Customer does not exists")]
    CustomerNotFound(CustomerId),

    #[error("Product does not exists.")]
    ProductLookupFailed,

    /// `requested` is what the message reports, not `available`.
    #[error("Product is not available, quantity in stock are {requested}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i32,
        available: i32,
    },

    #[error("Order does not exists")]
    OrderNotFound(OrderId),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl OrderError {
    /// True for business rule violations, false for store failures
    pub fn is_application_error(&self) -> bool {
        !matches!(self, OrderError::Repository(_))
    }

    /// Short label used for metrics and logs
    pub fn reason(&self) -> &'static str {
        match self {
            OrderError::CustomerNotFound(_) => "customer_not_found",
            OrderError::ProductLookupFailed => "product_lookup_failed",
            OrderError::InsufficientStock { .. } => "insufficient_stock",
            OrderError::OrderNotFound(_) => "order_not_found",
            OrderError::Repository(_) => "repository_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OrderError::CustomerNotFound(CustomerId::new("C1")).to_string(),
            "Customer does not exists"
        );
        assert_eq!(OrderError::ProductLookupFailed.to_string(), "Product does not exists.");
        assert_eq!(
            OrderError::InsufficientStock {
                product_id: ProductId::new("P1"),
                requested: 6,
                available: 5,
            }
            .to_string(),
            "Product is not available, quantity in stock are 6"
        );
    }

    #[test]
    fn test_repository_errors_are_not_application_errors() {
        let err = OrderError::from(anyhow::anyhow!("connection reset"));

        assert!(!err.is_application_error());
        assert_eq!(err.reason(), "repository_error");
        assert_eq!(err.to_string(), "connection reset");
        assert!(OrderError::ProductLookupFailed.is_application_error());
    }
}
