//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_with_registry, Counter, CounterVec, Histogram, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Classification metrics
    pub classify_requests: CounterVec,
    pub classify_request_duration: Histogram,

    // Rate limiting metrics
    pub rate_limit_delayed: Counter,
    pub rate_limit_immediate: Counter,

    // Synchronization metrics
    pub analysis_pulls: Counter,
    pub settings_updates: Counter,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let classify_requests = register_counter_vec_with_registry!(
            Opts::new("classify_requests_total", "Total classification requests"),
            &["status"],
            registry
        )?;

        let classify_request_duration = register_histogram_with_registry!(
            "classify_request_duration_seconds",
            "Classification request duration in seconds",
            registry
        )?;

        let rate_limit_delayed = register_counter_with_registry!(
            Opts::new("rate_limit_delayed_total", "Dispatches delayed by the rate limiter"),
            registry
        )?;

        let rate_limit_immediate = register_counter_with_registry!(
            Opts::new("rate_limit_immediate_total", "Dispatches sent without delay"),
            registry
        )?;

        let analysis_pulls = register_counter_with_registry!(
            Opts::new("analysis_pulls_total", "Analysis data pulls served by the page context"),
            registry
        )?;

        let settings_updates = register_counter_with_registry!(
            Opts::new("settings_updates_total", "Settings writes from any surface"),
            registry
        )?;

        Ok(Self {
            registry,
            classify_requests,
            classify_request_duration,
            rate_limit_delayed,
            rate_limit_immediate,
            analysis_pulls,
            settings_updates,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a classification request outcome
    pub fn record_classify(&self, status: &str) {
        self.classify_requests.with_label_values(&[status]).inc();
    }

    /// Record a rate limit decision
    pub fn record_rate_limit(&self, delayed: bool) {
        if delayed {
            self.rate_limit_delayed.inc();
        } else {
            self.rate_limit_immediate.inc();
        }
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
