use std::sync::Arc;
use std::time::Instant;

use crate::domain::customer::CustomerRepository;
use crate::domain::order::{NewOrder, Order, OrderError, OrderLineItem, OrderRepository, OrderRequest};
use crate::domain::product::{CatalogSnapshot, ProductId, ProductRepository};
use crate::metrics::Metrics;

// ============================================================================
// Create Order Use Case
// ============================================================================
//
// Orchestrates: Customer lookup → Catalog lookup → Stock check → Pricing → Store
//
// Reads and the final write are not isolated from each other: concurrent
// requests for the same product can both pass the stock check.
//
// ============================================================================

pub struct CreateOrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    customers: Arc<dyn CustomerRepository>,
    metrics: Option<Arc<Metrics>>,
}

impl CreateOrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            customers,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate the request against the customer store and the catalog, then
    /// persist the priced order.
    pub async fn execute(&self, request: OrderRequest) -> Result<Order, OrderError> {
        let started = Instant::now();
        let customer_id = request.customer_id.clone();
        let result = self.create(request).await;

        match &result {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    customer_id = %customer_id,
                    item_count = order.items.len(),
                    total = %order.total(),
                    "Order created"
                );
            }
            Err(e) if e.is_application_error() => {
                tracing::warn!(customer_id = %customer_id, reason = e.reason(), error = %e, "Order rejected");
            }
            Err(e) => {
                tracing::error!(customer_id = %customer_id, error = %e, "Order creation failed");
            }
        }

        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(order) => metrics.record_order_created(order.items.len()),
                Err(e) => metrics.record_order_rejected(e.reason()),
            }
            metrics.observe_use_case("create_order", started.elapsed().as_secs_f64());
        }

        result
    }

    async fn create(&self, request: OrderRequest) -> Result<Order, OrderError> {
        let customer = self
            .customers
            .find_by_id(&request.customer_id)
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(request.customer_id.clone()))?;

        let ids: Vec<ProductId> = request.items.iter().map(|item| item.product_id.clone()).collect();
        let catalog = self
            .products
            .find_all_by_id(&ids)
            .await?
            .map(CatalogSnapshot::new)
            .ok_or(OrderError::ProductLookupFailed)?;

        tracing::debug!(
            requested = ids.len(),
            resolved = catalog.len(),
            "Resolved catalog snapshot"
        );

        // Unknown ids resolve to stock 0 and fail here as insufficient stock.
        for item in &request.items {
            let available = catalog.stock_for(&item.product_id);
            if available < item.quantity {
                return Err(OrderError::InsufficientStock {
                    product_id: item.product_id.clone(),
                    requested: item.quantity,
                    available,
                });
            }
        }

        let items = request
            .items
            .into_iter()
            .map(|item| OrderLineItem {
                price: catalog.price_for(&item.product_id),
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        let order = self.orders.create(NewOrder { customer, items }).await?;
        Ok(order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::customer::{Customer, CustomerId, Email};
    use crate::domain::order::RequestedItem;
    use crate::domain::product::{CatalogProduct, NewProduct, Price};
    use crate::infrastructure::memory::{
        InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    };

    fn customer(id: &str) -> Customer {
        Customer {
            id: CustomerId::new(id),
            name: "Ada".to_string(),
            email: Email::new("ada@example.com"),
            created_at: Utc::now(),
        }
    }

    fn product(id: &str, cents: i64, quantity: i32) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            name: format!("Product {}", id),
            price: Price::from_cents(cents),
            quantity,
        }
    }

    fn request(customer_id: &str, items: Vec<RequestedItem>) -> OrderRequest {
        OrderRequest {
            customer_id: CustomerId::new(customer_id),
            items,
        }
    }

    struct Fixture {
        service: CreateOrderService,
        orders: Arc<InMemoryOrderRepository>,
    }

    fn fixture(customers: Vec<Customer>, products: Vec<CatalogProduct>) -> Fixture {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let service = CreateOrderService::new(
            orders.clone(),
            Arc::new(InMemoryProductRepository::with_products(products)),
            Arc::new(InMemoryCustomerRepository::with_customers(customers)),
        );
        Fixture { service, orders }
    }

    /// Catalog that never yields a result set
    struct NoResultCatalog;

    #[async_trait]
    impl ProductRepository for NoResultCatalog {
        async fn find_all_by_id(&self, _ids: &[ProductId]) -> Result<Option<Vec<CatalogProduct>>> {
            Ok(None)
        }

        async fn find_by_name(&self, _name: &str) -> Result<Option<CatalogProduct>> {
            Ok(None)
        }

        async fn create(&self, _product: NewProduct) -> Result<CatalogProduct> {
            anyhow::bail!("read-only catalog")
        }
    }

    /// Catalog that records every batch of ids it is asked for
    struct RecordingCatalog {
        inner: InMemoryProductRepository,
        calls: Mutex<Vec<Vec<ProductId>>>,
    }

    #[async_trait]
    impl ProductRepository for RecordingCatalog {
        async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Option<Vec<CatalogProduct>>> {
            self.calls.lock().unwrap().push(ids.to_vec());
            self.inner.find_all_by_id(ids).await
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<CatalogProduct>> {
            self.inner.find_by_name(name).await
        }

        async fn create(&self, product: NewProduct) -> Result<CatalogProduct> {
            self.inner.create(product).await
        }
    }

    /// Order store that fails every write
    struct FailingOrderStore {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl OrderRepository for FailingOrderStore {
        async fn create(&self, _order: NewOrder) -> Result<Order> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("write timeout")
        }

        async fn find_by_id(&self, _id: &crate::domain::order::OrderId) -> Result<Option<Order>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_unknown_customer_is_rejected() {
        let f = fixture(vec![], vec![product("P1", 1000, 5)]);

        let err = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P1", 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::CustomerNotFound(ref id) if id.as_str() == "C1"));
        assert_eq!(err.to_string(), "Customer does not exists");
        assert_eq!(f.orders.count().await, 0);
    }

    #[tokio::test]
    async fn test_order_priced_from_catalog() {
        let f = fixture(vec![customer("C1")], vec![product("P1", 1000, 5)]);

        let order = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P1", 5)]))
            .await
            .unwrap();

        assert_eq!(order.customer.id, CustomerId::new("C1"));
        assert_eq!(
            order.items,
            vec![OrderLineItem {
                product_id: ProductId::new("P1"),
                price: Price::from_cents(1000),
                quantity: 5,
            }]
        );
        assert_eq!(order.total(), Price::from_cents(5000));

        let stored = f.orders.find_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(stored, order);
    }

    #[tokio::test]
    async fn test_quantity_above_stock_reports_requested_quantity() {
        let f = fixture(vec![customer("C1")], vec![product("P1", 1000, 5)]);

        let err = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P1", 6)]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Product is not available, quantity in stock are 6");
        match err {
            OrderError::InsufficientStock { product_id, requested, available } => {
                assert_eq!(product_id, ProductId::new("P1"));
                assert_eq!(requested, 6);
                assert_eq!(available, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.orders.count().await, 0);
    }

    #[tokio::test]
    async fn test_unmatched_product_is_treated_as_out_of_stock() {
        let f = fixture(vec![customer("C1")], vec![]);

        let err = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P2", 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Product is not available, quantity in stock are 1");
        assert!(matches!(err, OrderError::InsufficientStock { available: 0, .. }));
        assert_eq!(f.orders.count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_result_set_fails_product_lookup() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let service = CreateOrderService::new(
            orders.clone(),
            Arc::new(NoResultCatalog),
            Arc::new(InMemoryCustomerRepository::with_customers(vec![customer("C1")])),
        );

        let err = service
            .execute(request("C1", vec![RequestedItem::new("P1", 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::ProductLookupFailed));
        assert_eq!(err.to_string(), "Product does not exists.");
        assert_eq!(orders.count().await, 0);
    }

    #[tokio::test]
    async fn test_first_failing_item_aborts_in_request_order() {
        let f = fixture(
            vec![customer("C1")],
            vec![product("P1", 1000, 5), product("P2", 500, 1)],
        );

        let err = f
            .service
            .execute(request(
                "C1",
                vec![
                    RequestedItem::new("P1", 2),
                    RequestedItem::new("P2", 3),
                    RequestedItem::new("P3", 7),
                ],
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::InsufficientStock { ref product_id, requested: 3, available: 1 }
                if product_id.as_str() == "P2"
        ));
    }

    #[tokio::test]
    async fn test_products_resolved_in_one_batched_call() {
        let catalog = Arc::new(RecordingCatalog {
            inner: InMemoryProductRepository::with_products(vec![
                product("P1", 1000, 5),
                product("P2", 250, 8),
            ]),
            calls: Mutex::new(Vec::new()),
        });
        let service = CreateOrderService::new(
            Arc::new(InMemoryOrderRepository::new()),
            catalog.clone(),
            Arc::new(InMemoryCustomerRepository::with_customers(vec![customer("C1")])),
        );

        let order = service
            .execute(request(
                "C1",
                vec![RequestedItem::new("P2", 4), RequestedItem::new("P1", 1)],
            ))
            .await
            .unwrap();

        let calls = catalog.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec![ProductId::new("P2"), ProductId::new("P1")]);

        // line items keep request order
        let ids: Vec<&str> = order.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P2", "P1"]);
        assert_eq!(order.items[0].price, Price::from_cents(250));
    }

    #[tokio::test]
    async fn test_identical_requests_create_distinct_orders() {
        let f = fixture(vec![customer("C1")], vec![product("P1", 1000, 5)]);
        let req = request("C1", vec![RequestedItem::new("P1", 5)]);

        let first = f.service.execute(req.clone()).await.unwrap();
        let second = f.service.execute(req).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(f.orders.count().await, 2);
    }

    #[tokio::test]
    async fn test_empty_and_zero_quantity_requests_are_permitted() {
        let f = fixture(vec![customer("C1")], vec![]);

        let empty = f.service.execute(request("C1", vec![])).await.unwrap();
        assert!(empty.items.is_empty());

        // zero requested against zero stock passes the check, priced at zero
        let zero = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P9", 0)]))
            .await
            .unwrap();
        assert_eq!(zero.items[0].price, Price::ZERO);
        assert_eq!(f.orders.count().await, 2);
    }

    #[tokio::test]
    async fn test_negative_quantity_is_permitted() {
        let f = fixture(vec![customer("C1")], vec![product("P1", 1000, 5)]);

        let order = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P1", -2)]))
            .await
            .unwrap();

        assert_eq!(order.items[0].quantity, -2);
        assert_eq!(order.items[0].price, Price::from_cents(1000));
        assert_eq!(order.total(), Price::from_cents(-2000));
        assert_eq!(f.orders.count().await, 1);
    }

    #[tokio::test]
    async fn test_oversized_total_does_not_fail_a_stored_order() {
        let f = fixture(
            vec![customer("C1")],
            vec![product("P1", i64::MAX / 2, 10)],
        );

        let order = f
            .service
            .execute(request("C1", vec![RequestedItem::new("P1", 3)]))
            .await
            .unwrap();

        assert_eq!(order.items[0].price, Price::from_cents(i64::MAX / 2));
        assert_eq!(order.total(), Price::MAX);
        assert_eq!(f.orders.count().await, 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = Arc::new(FailingOrderStore { attempts: AtomicUsize::new(0) });
        let service = CreateOrderService::new(
            store.clone(),
            Arc::new(InMemoryProductRepository::with_products(vec![product("P1", 1000, 5)])),
            Arc::new(InMemoryCustomerRepository::with_customers(vec![customer("C1")])),
        );

        let err = service
            .execute(request("C1", vec![RequestedItem::new("P1", 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Repository(_)));
        assert!(!err.is_application_error());
        assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_outcomes_recorded_in_metrics() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let f = fixture(vec![customer("C1")], vec![product("P1", 1000, 5)]);
        let service = f.service.with_metrics(metrics.clone());

        service
            .execute(request("C1", vec![RequestedItem::new("P1", 1)]))
            .await
            .unwrap();
        service
            .execute(request("C1", vec![RequestedItem::new("P1", 50)]))
            .await
            .unwrap_err();
        service
            .execute(request("C2", vec![RequestedItem::new("P1", 1)]))
            .await
            .unwrap_err();

        assert_eq!(metrics.orders_created.get(), 1);
        assert_eq!(
            metrics.orders_rejected.with_label_values(&["insufficient_stock"]).get(),
            1
        );
        assert_eq!(
            metrics.orders_rejected.with_label_values(&["customer_not_found"]).get(),
            1
        );
        assert_eq!(
            metrics.use_case_duration.with_label_values(&["create_order"]).get_sample_count(),
            3
        );
    }
}
