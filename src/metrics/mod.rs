//! Prometheus metrics for the analysis engine
//!
//! This module tracks:
//! - Analyses computed and their duration
//! - Memoization cache hits and misses
//! - Analyses rejected by kind of data condition
//!
//! # Usage
//!
//! Call `init_metrics()` once at application startup to register all
//! metrics. Before initialization, or if it fails, recording is a no-op.

use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, TextEncoder,
};
use std::sync::OnceLock;

/// Container for all analysis metrics
struct AnalysisMetrics {
    analyses: Counter,
    failures: CounterVec,
    cache_hits: Counter,
    cache_misses: Counter,
    duration: Histogram,
}

/// Global storage for analysis metrics
static ANALYSIS_METRICS: OnceLock<AnalysisMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// Initialize all Prometheus metrics
///
/// Registers with the default registry. Subsequent calls are no-ops.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = polo_analytics::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double registration
    if METRICS_INIT_ATTEMPTED.set(true).is_err() {
        return Ok(());
    }

    let metrics = AnalysisMetrics {
        analyses: register_counter!(
            "polo_analyses_total",
            "Total number of analyses computed"
        )?,
        failures: register_counter_vec!(
            "polo_analysis_failures_total",
            "Analyses rejected by data condition",
            &["kind"]
        )?,
        cache_hits: register_counter!(
            "polo_analysis_cache_hits_total",
            "Analyses served from the memoization cache"
        )?,
        cache_misses: register_counter!(
            "polo_analysis_cache_misses_total",
            "Analyses recomputed after a cache miss"
        )?,
        duration: register_histogram!(
            "polo_analysis_duration_seconds",
            "Time spent computing one analysis in seconds",
            vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]
        )?,
    };

    if ANALYSIS_METRICS.set(metrics).is_err() {
        tracing::warn!("Analysis metrics already initialized");
    }

    Ok(())
}

/// Check if metrics are initialized
pub fn metrics_initialized() -> bool {
    ANALYSIS_METRICS.get().is_some()
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record one completed analysis
pub fn record_analysis(duration_secs: f64) {
    if let Some(m) = ANALYSIS_METRICS.get() {
        m.analyses.inc();
        m.duration.observe(duration_secs);
    }
}

/// Record an analysis rejected by a data condition
pub fn record_failure(kind: &str) {
    if let Some(m) = ANALYSIS_METRICS.get() {
        m.failures.with_label_values(&[kind]).inc();
    }
}

/// Record a memoization lookup
pub fn record_cache_lookup(hit: bool) {
    let Some(m) = ANALYSIS_METRICS.get() else {
        return;
    };

    if hit {
        m.cache_hits.inc();
    } else {
        m.cache_misses.inc();
    }
}
