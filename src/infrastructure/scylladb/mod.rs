// ============================================================================
// ScyllaDB Repositories
// ============================================================================
//
// Tables:
// - customers / customers_by_email
// - products / products_by_name
// - orders (line items as JSON text)
// - outbox_messages (OrderCreated events for downstream publishers)
//
// ============================================================================

mod session;
mod customer_repository;
mod product_repository;
mod order_repository;

pub use session::connect;
pub use customer_repository::ScyllaCustomerRepository;
pub use product_repository::ScyllaProductRepository;
pub use order_repository::ScyllaOrderRepository;

use scylla::response::query_result::{IntoRowsResultError, QueryResult, QueryRowsResult};

/// Rows payload of a response, or `None` when the response carries no rows.
/// Failing to read the rows metadata is an error, not an empty result.
pub(crate) fn rows_or_none(result: QueryResult) -> anyhow::Result<Option<QueryRowsResult>> {
    match result.into_rows_result() {
        Ok(rows) => Ok(Some(rows)),
        Err(IntoRowsResultError::ResultNotRows(_)) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("Failed to read rows result: {}", e)),
    }
}
