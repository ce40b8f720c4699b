use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::product::{CatalogProduct, NewProduct, Price, ProductError, ProductRepository};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Price,
    pub quantity: i32,
}

/// Adds a product to the catalog; names are unique
pub struct CreateProductService {
    products: Arc<dyn ProductRepository>,
}

impl CreateProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, request: CreateProductRequest) -> Result<CatalogProduct, ProductError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        if request.price.is_negative() {
            return Err(ProductError::NegativePrice(request.price));
        }
        if request.quantity < 0 {
            return Err(ProductError::NegativeQuantity(request.quantity));
        }

        if self.products.find_by_name(name).await?.is_some() {
            tracing::warn!(name = %name, "Product name already in catalog");
            return Err(ProductError::AlreadyExists);
        }

        let product = self
            .products
            .create(NewProduct {
                name: name.to_string(),
                price: request.price,
                quantity: request.quantity,
            })
            .await?;

        tracing::info!(
            product_id = %product.id,
            price = %product.price,
            quantity = product.quantity,
            "Product added to catalog"
        );
        Ok(product)
    }
}
