//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the filmdex server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Dataset documents on disk (collected dynamically)
//! - Core metrics (dataset lookups, listing fetches, link resolution)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use filmdex_core::DatasetStore;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Label used for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "filmdex_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("filmdex_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "filmdex_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Dataset Metrics (collected dynamically)
// =============================================================================

/// Dataset documents in the configured directory.
pub static DATASET_DOCUMENTS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "filmdex_dataset_documents",
        "Number of dataset documents in the dataset directory",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Dataset
    registry
        .register(Box::new(DATASET_DOCUMENTS.clone()))
        .unwrap();

    // Core metrics (lookups, listing fetches, link resolution)
    for metric in filmdex_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so gauges reflect the dataset directory as it is now.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let store: &dyn DatasetStore = state.library().store().as_ref();
    if let Ok(documents) = store.documents() {
        DATASET_DOCUMENTS.set(documents.len() as i64);
    }
}
