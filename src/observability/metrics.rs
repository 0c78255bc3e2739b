//! Metrics collection and exposition.
//!
//! # Metrics
//! - `frontier_requests_total` (counter): requests by outcome
//!   (`matched` / `unmatched`)
//! - `frontier_request_duration_seconds` (histogram): handler latency by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome label for a dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    Unmatched,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::Unmatched => "unmatched",
        }
    }
}

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(outcome: Outcome, start: Instant) {
    let label = outcome.as_str();
    ::metrics::counter!("frontier_requests_total", "outcome" => label).increment(1);
    ::metrics::histogram!("frontier_request_duration_seconds", "outcome" => label)
        .record(start.elapsed().as_secs_f64());
}
