//! Prometheus metrics for the scan and HTTP layers.

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,

    pub scan_cycles_total: IntCounter,
    pub evaluations_total: IntCounter,
    pub evaluation_failures_total: IntCounter,
    pub high_confidence_signals_total: IntCounter,
    pub evaluation_duration_seconds: Histogram,

    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: Histogram,

    pub provider_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scan_cycles_total =
            IntCounter::new("scan_cycles_total", "Completed scan cycles")?;
        let evaluations_total =
            IntCounter::new("evaluations_total", "Completed signal evaluations")?;
        let evaluation_failures_total = IntCounter::new(
            "evaluation_failures_total",
            "Evaluations skipped due to errors (e.g. insufficient data)",
        )?;
        let high_confidence_signals_total = IntCounter::new(
            "high_confidence_signals_total",
            "Recommendations at or above the alert threshold",
        )?;
        let evaluation_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "evaluation_duration_seconds",
            "Wall time of a single evaluation",
        ))?;

        let http_requests_total =
            IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_requests_in_flight =
            Gauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        let provider_connected = Gauge::new(
            "provider_connected",
            "1 when the market data provider last responded successfully",
        )?;

        registry.register(Box::new(scan_cycles_total.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(evaluation_failures_total.clone()))?;
        registry.register(Box::new(high_confidence_signals_total.clone()))?;
        registry.register(Box::new(evaluation_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(provider_connected.clone()))?;

        Ok(Self {
            registry,
            scan_cycles_total,
            evaluations_total,
            evaluation_failures_total,
            high_confidence_signals_total,
            evaluation_duration_seconds,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            provider_connected,
        })
    }

    /// Export all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
