use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use order_service::application::{
    CreateCustomerRequest, CreateCustomerService, CreateOrderService, CreateProductRequest,
    CreateProductService, FindOrderService,
};
use order_service::config::Config;
use order_service::domain::order::{OrderRequest, RequestedItem};
use order_service::domain::product::Price;
use order_service::infrastructure::Repositories;
use order_service::metrics::{self, Metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug"))
        )
        .init();

    tracing::info!(storage = ?config.storage, "🚀 Starting order service");

    // === 1. Metrics registry + HTTP endpoint ===
    let metrics = Arc::new(Metrics::new()?);
    let server_metrics = metrics.clone();
    let storage = config.storage;
    let metrics_port = config.metrics_port;
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build metrics runtime: {}", e);
                return;
            }
        };
        rt.block_on(async {
            if let Err(e) = metrics::start_metrics_server(server_metrics, storage, metrics_port).await {
                tracing::error!("Metrics server error: {}", e);
            }
        });
    });

    // === 2. Repositories and use cases ===
    let repos = Repositories::from_config(&config).await?;

    let create_customer = CreateCustomerService::new(repos.customers.clone());
    let create_product = CreateProductService::new(repos.products.clone());
    let create_order = CreateOrderService::new(
        repos.orders.clone(),
        repos.products.clone(),
        repos.customers.clone(),
    )
    .with_metrics(metrics.clone());
    let find_order = FindOrderService::new(repos.orders.clone());

    // === 3. Seed a customer and a product ===
    let run_id = Uuid::new_v4().simple().to_string();
    let suffix = &run_id[..8];

    let customer = create_customer
        .execute(CreateCustomerRequest {
            name: "Demo Customer".to_string(),
            email: format!("demo+{}@example.com", suffix),
        })
        .await?;

    let product = create_product
        .execute(CreateProductRequest {
            name: format!("Mechanical keyboard {}", suffix),
            price: Price::from_cents(8990),
            quantity: 5,
        })
        .await?;

    // === 4. Place an order within stock ===
    let order = create_order
        .execute(OrderRequest {
            customer_id: customer.id.clone(),
            items: vec![RequestedItem {
                product_id: product.id.clone(),
                quantity: 2,
            }],
        })
        .await?;

    let stored = find_order.execute(order.id).await?;
    tracing::info!(
        order_id = %stored.id,
        total = %stored.total(),
        "✅ Order stored and read back"
    );

    // === 5. Order above stock is rejected ===
    match create_order
        .execute(OrderRequest {
            customer_id: customer.id.clone(),
            items: vec![RequestedItem {
                product_id: product.id.clone(),
                quantity: product.quantity + 1,
            }],
        })
        .await
    {
        Ok(order) => tracing::warn!(order_id = %order.id, "Order above stock was accepted"),
        Err(e) => tracing::info!(error = %e, "Order above stock rejected as expected"),
    }

    tracing::info!(
        "Metrics available on http://0.0.0.0:{}/metrics, press Ctrl+C to exit",
        config.metrics_port
    );
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    Ok(())
}
