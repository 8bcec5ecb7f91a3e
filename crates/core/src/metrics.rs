//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Portal requests (login, order report, cycle catalog)
//! - Photo orders extracted from reports

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Portal Metrics
// =============================================================================

/// Portal requests by operation and result.
pub static PORTAL_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("repartos_portal_requests_total", "Total SIGOF portal requests"),
        &["operation", "result"], // operation: "login", "report", "catalog"
    )
    .unwrap()
});

/// Portal request duration in seconds.
pub static PORTAL_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "repartos_portal_request_duration_seconds",
            "Duration of SIGOF portal requests",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

// =============================================================================
// Report Metrics
// =============================================================================

/// Photo orders extracted from reports.
pub static PHOTO_ORDERS_EXTRACTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "repartos_photo_orders_extracted_total",
        "Total report rows flagged with a photo",
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PORTAL_REQUESTS.clone()),
        Box::new(PORTAL_REQUEST_DURATION.clone()),
        Box::new(PHOTO_ORDERS_EXTRACTED.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_registers_cleanly() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        PORTAL_REQUESTS.with_label_values(&["login", "success"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"repartos_portal_requests_total".to_string()));
    }
}
