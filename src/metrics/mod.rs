// Private module declaration
mod server;

use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for the order use cases
// ============================================================================
//
// Provides:
// - Order creation outcomes (created / rejected by reason)
// - Line items per created order
// - Use case latency
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub orders_rejected: IntCounterVec,
    pub order_line_items: Histogram,
    pub use_case_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new("orders_created_total", "Total orders created")?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Total order requests rejected"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        let order_line_items = Histogram::with_opts(
            HistogramOpts::new("order_line_items", "Line items per created order")
                .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
        )?;
        registry.register(Box::new(order_line_items.clone()))?;

        let use_case_duration = HistogramVec::new(
            HistogramOpts::new("use_case_duration_seconds", "Use case execution duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["use_case"],
        )?;
        registry.register(Box::new(use_case_duration.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            orders_rejected,
            order_line_items,
            use_case_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_created(&self, item_count: usize) {
        self.orders_created.inc();
        self.order_line_items.observe(item_count as f64);
    }

    pub fn record_order_rejected(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    pub fn observe_use_case(&self, use_case: &str, duration_secs: f64) {
        self.use_case_duration.with_label_values(&[use_case]).observe(duration_secs);
    }
}
