// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (OrderId, OrderRequest, OrderLineItem, Order, NewOrder)
// - Events (OrderCreated, published through the outbox)
// - Errors (OrderError enum)
// - Repository port (OrderRepository)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod errors;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use errors::*;
pub use repository::*;
