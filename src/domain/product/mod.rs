// ============================================================================
// Product Domain - Catalog read model
// ============================================================================
//
// - Value objects (ProductId, Price, CatalogProduct, NewProduct)
// - Catalog snapshot (point-in-time view used while pricing an order)
// - Errors (ProductError enum)
// - Repository port (ProductRepository)
//
// ============================================================================

pub mod value_objects;
pub mod catalog;
pub mod errors;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use catalog::*;
pub use errors::*;
pub use repository::*;
