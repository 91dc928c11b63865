//! Metrics collection and Prometheus export.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Later calls are no-ops, which lets
/// several test applications share one process.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .unwrap_or_else(|e| {
                tracing::warn!("Prometheus recorder unavailable, metrics stay local: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            })
    });
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_store_operation(operation: &'static str, outcome: &'static str) {
    counter!(
        "product_store_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
