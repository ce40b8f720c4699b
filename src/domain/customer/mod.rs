// ============================================================================
// Customer Domain
// ============================================================================
//
// - Value objects (CustomerId, Email, Customer, NewCustomer)
// - Errors (CustomerError enum)
// - Repository port (CustomerRepository)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use repository::*;
