//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_rpc_up` (gauge): 1=RPC reachable, 0=unreachable
//!
//! # Design Decisions
//! - Routes are labeled by template, never by raw path, to bound
//!   label cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            describe_counter!(
                "gateway_requests_total",
                "Requests served, by method, route template and status"
            );
            describe_histogram!(
                "gateway_request_duration_seconds",
                "Request latency in seconds"
            );
            describe_gauge!("gateway_rpc_up", "RPC endpoint reachability (1/0)");
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one served request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("gateway_requests_total", &labels).increment(1);
    histogram!("gateway_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an RPC reachability probe.
pub fn record_rpc_health(healthy: bool) {
    gauge!("gateway_rpc_up").set(if healthy { 1.0 } else { 0.0 });
}
