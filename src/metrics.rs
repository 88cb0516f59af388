//! Prometheus metrics for the dashboard service

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub signals_classified_total: IntCounter,
    pub signal_records_rejected_total: IntCounter,
    pub backend_fetch_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let signals_classified_total = IntCounter::new(
            "signals_classified_total",
            "Signal records turned into display cards",
        )?;
        let signal_records_rejected_total = IntCounter::new(
            "signal_records_rejected_total",
            "Malformed signal records skipped during decoding",
        )?;
        let backend_fetch_failures_total = IntCounter::new(
            "backend_fetch_failures_total",
            "Failed requests to the signal backend",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(signals_classified_total.clone()))?;
        registry.register(Box::new(signal_records_rejected_total.clone()))?;
        registry.register(Box::new(backend_fetch_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            signals_classified_total,
            signal_records_rejected_total,
            backend_fetch_failures_total,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
