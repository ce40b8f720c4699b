use anyhow::Result;
use async_trait::async_trait;

use super::value_objects::{CatalogProduct, NewProduct, ProductId};

/// Product catalog port
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Resolve many products in one call.
    ///
    /// The returned list may hold fewer products than `ids` (unknown ids are
    /// skipped). `None` means the store produced no result set at all.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Option<Vec<CatalogProduct>>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogProduct>>;

    /// Persist a new product and return it with its assigned id
    async fn create(&self, product: NewProduct) -> Result<CatalogProduct>;
}
