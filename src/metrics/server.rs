use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;

use super::Metrics;
use crate::config::StorageBackend;

/// Shared state behind the `/metrics` and `/health` handlers
struct ServerState {
    metrics: Arc<Metrics>,
    storage: StorageBackend,
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    service: &'static str,
    storage: &'static str,
    orders_created: u64,
}

/// Serve the order metrics and a health report for the given storage backend.
/// Runs until the server stops, so give it its own thread/runtime.
pub async fn start_metrics_server(
    metrics: Arc<Metrics>,
    storage: StorageBackend,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!(port, storage = storage.as_str(), "Starting metrics server");

    let state = web::Data::new(ServerState { metrics, storage });
    HttpServer::new(move || routes(App::new().app_data(state.clone())))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}

fn routes<T>(app: App<T>) -> App<T>
where
    T: actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Error = actix_web::Error,
        InitError = (),
    >,
{
    app.route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(health_handler))
}

async fn metrics_handler(state: web::Data<ServerState>) -> impl Responder {
    let encoder = TextEncoder::new();
    let families = state.metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode order metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

async fn health_handler(state: web::Data<ServerState>) -> impl Responder {
    HttpResponse::Ok().json(HealthReport {
        status: "healthy",
        service: "order-service",
        storage: state.storage.as_str(),
        orders_created: state.metrics.orders_created.get(),
    })
}
