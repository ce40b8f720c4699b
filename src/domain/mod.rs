// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Errors
// - Repository port (implemented in src/infrastructure/)
//
// This layer knows nothing about storage engines or transports.
//
// ============================================================================

pub mod customer;
pub mod order;
pub mod product;
