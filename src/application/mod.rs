// ============================================================================
// Application Layer - Use Cases
// ============================================================================
//
// Each service takes its collaborators as `Arc<dyn Repository>` and exposes a
// single `execute` method.
//
// ============================================================================

pub mod create_customer;
pub mod create_order;
pub mod create_product;
pub mod find_order;

pub use create_customer::{CreateCustomerRequest, CreateCustomerService};
pub use create_order::CreateOrderService;
pub use create_product::{CreateProductRequest, CreateProductService};
pub use find_order::FindOrderService;
