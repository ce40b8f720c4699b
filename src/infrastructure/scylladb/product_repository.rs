use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use scylla::client::session::Session;
use scylla::statement::batch::Batch;
use uuid::Uuid;

use super::rows_or_none;
use crate::domain::product::{CatalogProduct, NewProduct, Price, ProductId, ProductRepository};

type ProductRow = (String, String, i64, i32);

pub struct ScyllaProductRepository {
    session: Arc<Session>,
}

impl ScyllaProductRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogProduct>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT id, name, price_cents, quantity FROM products WHERE id = ?",
                (id,),
            )
            .await?;

        let Some(rows_result) = rows_or_none(result)? else {
            return Ok(None);
        };

        Ok(rows_result.maybe_first_row::<ProductRow>()?.map(product_from_row))
    }
}

fn product_from_row((id, name, price_cents, quantity): ProductRow) -> CatalogProduct {
    CatalogProduct {
        id: ProductId(id),
        name,
        price: Price::from_cents(price_cents),
        quantity,
    }
}

#[async_trait]
impl ProductRepository for ScyllaProductRepository {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Option<Vec<CatalogProduct>>> {
        if ids.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let keys: Vec<&str> = ids.iter().map(ProductId::as_str).collect();
        let result = self
            .session
            .query_unpaged(
                "SELECT id, name, price_cents, quantity FROM products WHERE id IN ?",
                (keys,),
            )
            .await?;

        // A response without a rows payload means the lookup produced no result set.
        let Some(rows_result) = rows_or_none(result)? else {
            return Ok(None);
        };

        let mut products = Vec::new();
        for row in rows_result.rows::<ProductRow>()? {
            products.push(product_from_row(row?));
        }

        tracing::debug!(
            requested = ids.len(),
            found = products.len(),
            "Loaded catalog products"
        );
        Ok(Some(products))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogProduct>> {
        let result = self
            .session
            .query_unpaged("SELECT product_id FROM products_by_name WHERE name = ?", (name,))
            .await?;

        let Some(rows_result) = rows_or_none(result)? else {
            return Ok(None);
        };

        match rows_result.maybe_first_row::<(String,)>()? {
            Some((product_id,)) => self.find_by_id(&product_id).await,
            None => Ok(None),
        }
    }

    async fn create(&self, product: NewProduct) -> Result<CatalogProduct> {
        let product = CatalogProduct {
            id: ProductId(Uuid::new_v4().to_string()),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        };

        let mut batch = Batch::default();
        batch.append_statement(
            "INSERT INTO products (id, name, price_cents, quantity) VALUES (?, ?, ?, ?)",
        );
        batch.append_statement("INSERT INTO products_by_name (name, product_id) VALUES (?, ?)");

        self.session
            .batch(
                &batch,
                (
                    (
                        product.id.as_str(),
                        product.name.as_str(),
                        product.price.cents(),
                        product.quantity,
                    ),
                    (product.name.as_str(), product.id.as_str()),
                ),
            )
            .await?;

        tracing::info!(product_id = %product.id, "Persisted product");
        Ok(product)
    }
}
