//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Dataset lookups (year listings, searches, detail lookups)
//! - Directory listing fetches
//! - Direct-link resolution

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts};

// =============================================================================
// Dataset Metrics
// =============================================================================

/// Dataset lookups by operation and outcome.
pub static DATASET_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filmdex_dataset_lookups_total",
            "Total dataset lookups",
        ),
        &["operation", "outcome"], // operation: "year", "search", "detail"; outcome: "ok", "not_found", "error"
    )
    .unwrap()
});

// =============================================================================
// Listing Metrics
// =============================================================================

/// Listing page fetches by result.
pub static LISTING_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filmdex_listing_fetches_total",
            "Total directory listing fetches",
        ),
        &["result"], // "success", "http_error", "timeout", "error"
    )
    .unwrap()
});

/// Listing page fetch duration in seconds.
pub static LISTING_FETCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "filmdex_listing_fetch_duration_seconds",
            "Duration of directory listing fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap()
});

/// Detail link resolutions by outcome.
pub static DETAIL_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filmdex_detail_resolutions_total",
            "Total direct-link resolutions for detail lookups",
        ),
        &["outcome"], // "resolved", "unresolved"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(DATASET_LOOKUPS.clone()),
        Box::new(LISTING_FETCHES.clone()),
        Box::new(LISTING_FETCH_DURATION.clone()),
        Box::new(DETAIL_RESOLUTIONS.clone()),
    ]
}
