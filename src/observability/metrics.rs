//! Metrics collection and exposition.
//!
//! # Metrics
//! - `user_service_requests_total` (counter): requests by route, status
//! - `user_service_request_duration_seconds` (histogram): latency by route
//! - `user_service_upstream_errors_total` (counter): name-service failures by kind
//!
//! Both routes (`/users`, `/health`) are recorded by their handlers. Requests
//! cut off by the inbound timeout layer (408) never reach a handler and are
//! not counted.
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(route: &'static str, status: u16, start_time: Instant) {
    ::metrics::counter!(
        "user_service_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("user_service_request_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a failed name-service call.
pub fn record_upstream_error(kind: &'static str) {
    ::metrics::counter!("user_service_upstream_errors_total", "kind" => kind).increment(1);
}
