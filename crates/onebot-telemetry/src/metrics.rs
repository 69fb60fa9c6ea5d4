//! Prometheus metrics for the correlation broker.
//!
//! All metrics follow the naming convention: `onebot_<subject>_<metric>`.
//! Broker statistics are cumulative inside the broker, so they are
//! published here as gauges and set from a snapshot.

use lazy_static::lazy_static;
use prometheus::{exponential_buckets, Encoder, Gauge, Histogram, HistogramOpts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Calls currently waiting for a response
    pub static ref PENDING_CALLS: Gauge = Gauge::new(
        "onebot_broker_pending_calls",
        "Number of call-mode requests waiting for a response"
    ).expect("metric creation failed");

    pub static ref CALLS_REGISTERED: Gauge = Gauge::new(
        "onebot_broker_calls_registered",
        "Correlation IDs registered since start"
    ).expect("metric creation failed");

    pub static ref CALLS_RESOLVED: Gauge = Gauge::new(
        "onebot_broker_calls_resolved",
        "Calls completed by a matching response"
    ).expect("metric creation failed");

    pub static ref CALLS_TIMED_OUT: Gauge = Gauge::new(
        "onebot_broker_calls_timed_out",
        "Calls that reached the wait bound without a response"
    ).expect("metric creation failed");

    pub static ref CALLS_ABANDONED: Gauge = Gauge::new(
        "onebot_broker_calls_abandoned",
        "Registrations dropped before a response arrived"
    ).expect("metric creation failed");

    pub static ref RESPONSES_UNMATCHED: Gauge = Gauge::new(
        "onebot_broker_responses_unmatched",
        "Responses with no waiting call"
    ).expect("metric creation failed");

    /// Wall time of call-mode requests, including timeouts
    pub static ref CALL_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "onebot_api_call_duration_seconds",
            "Time from sending a call-mode request to its outcome"
        ).buckets(exponential_buckets(0.0005, 2.0, 16).expect("bucket layout"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PENDING_CALLS.clone()),
        Box::new(CALLS_REGISTERED.clone()),
        Box::new(CALLS_RESOLVED.clone()),
        Box::new(CALLS_TIMED_OUT.clone()),
        Box::new(CALLS_ABANDONED.clone()),
        Box::new(RESPONSES_UNMATCHED.clone()),
        Box::new(CALL_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
