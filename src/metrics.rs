// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the ExternalDNS operator webhooks.
//!
//! All metrics use the namespace prefix `externaldns_olm_openshift_io_`
//! (prometheus-safe version of "externaldns.olm.openshift.io").
//!
//! # Metrics Categories
//!
//! - **Admission Metrics** - Requests reviewed by the validating webhook and their verdicts
//! - **Violation Metrics** - Which admission rules reject resources
//! - **Conversion Metrics** - Objects converted between served versions
//!
//! # Example
//!
//! ```rust,no_run
//! use external_dns_operator::metrics::record_admission;
//!
//! record_admission("CREATE", "allowed", std::time::Duration::from_millis(2));
//! ```

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all operator metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "externaldns_olm_openshift_io";

/// Admission result label for admitted requests
pub const RESULT_ALLOWED: &str = "allowed";

/// Admission result label for rejected requests
pub const RESULT_DENIED: &str = "denied";

/// Result label for requests that could not be decoded
pub const RESULT_ERROR: &str = "error";

/// Conversion result label for converted objects
pub const RESULT_SUCCESS: &str = "success";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Admission Metrics
// ============================================================================

/// Total number of admission reviews by operation and result
///
/// Labels:
/// - `operation`: Admission operation (`CREATE`, `UPDATE`, `DELETE`)
/// - `result`: Verdict (`allowed`, `denied`, `error`)
pub static ADMISSION_REQUESTS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_admission_requests_total"),
        "Total number of admission reviews by operation and result",
    );
    let counter = CounterVec::new(opts, &["operation", "result"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of admission reviews in seconds
///
/// Labels:
/// - `operation`: Admission operation
pub static ADMISSION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_admission_duration_seconds"),
        "Duration of admission reviews in seconds by operation",
    )
    .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]);
    let histogram = HistogramVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Violation Metrics
// ============================================================================

/// Total number of rule violations by reason code
///
/// Labels:
/// - `reason`: CamelCase reason code (e.g., `AWSCredentialsRequired`)
pub static ADMISSION_VIOLATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_admission_violations_total"),
        "Total number of admission rule violations by reason",
    );
    let counter = CounterVec::new(opts, &["reason"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Conversion Metrics
// ============================================================================

/// Total number of converted objects by desired version and result
///
/// Labels:
/// - `desired_version`: Requested apiVersion
/// - `result`: Outcome (`success`, `error`)
pub static CONVERSIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_conversions_total"),
        "Total number of objects converted between served versions",
    );
    let counter = CounterVec::new(opts, &["desired_version", "result"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record one admission review
///
/// # Arguments
/// * `operation` - Admission operation (e.g., `CREATE`)
/// * `result` - One of [`RESULT_ALLOWED`], [`RESULT_DENIED`], [`RESULT_ERROR`]
/// * `duration` - Time spent reviewing the request
pub fn record_admission(operation: &str, result: &str, duration: Duration) {
    ADMISSION_REQUESTS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
    ADMISSION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Record one failed admission rule
pub fn record_violation(reason: &str) {
    ADMISSION_VIOLATIONS_TOTAL
        .with_label_values(&[reason])
        .inc();
}

/// Record one converted object
pub fn record_conversion(desired_version: &str, result: &str) {
    CONVERSIONS_TOTAL
        .with_label_values(&[desired_version, result])
        .inc();
}

/// Gather all metrics in Prometheus text format
///
/// # Errors
/// Returns error if metrics encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
