use std::collections::HashMap;

use super::value_objects::{CatalogProduct, Price, ProductId};

// ============================================================================
// Catalog Snapshot
// ============================================================================
//
// Products returned by a single `find_all_by_id` call, indexed by id.
// Ids that were requested but not returned resolve to zero stock and a zero
// price.
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: HashMap<ProductId, CatalogProduct>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        for product in products {
            // first occurrence wins
            index.entry(product.id.clone()).or_insert(product);
        }
        Self { products: index }
    }

    pub fn find(&self, id: &ProductId) -> Option<&CatalogProduct> {
        self.products.get(id)
    }

    /// Available stock, 0 when the id is not in the snapshot
    pub fn stock_for(&self, id: &ProductId) -> i32 {
        self.find(id).map(|product| product.quantity).unwrap_or(0)
    }

    /// Current price, `Price::ZERO` when the id is not in the snapshot
    pub fn price_for(&self, id: &ProductId) -> Price {
        self.find(id).map(|product| product.price).unwrap_or(Price::ZERO)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
