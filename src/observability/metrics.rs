//! Metrics collection and exposition.
//!
//! # Metrics
//! - `admin_actions_total` (counter): handled actions by route, method, outcome
//! - `admin_action_duration_seconds` (histogram): action latency
//! - `admin_rpc_calls_total` (counter): backend calls by service, method, outcome
//! - `admin_rpc_duration_seconds` (histogram): backend call latency
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels stay low-cardinality: route templates, never raw paths with ids

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_action(route: &str, method: &str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "admin_actions_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "admin_action_duration_seconds",
        "route" => route.to_string(),
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_rpc_call(service: &'static str, method: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!(
        "admin_rpc_calls_total",
        "service" => service,
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("admin_rpc_duration_seconds", "service" => service, "method" => method)
        .record(start.elapsed().as_secs_f64());
}
