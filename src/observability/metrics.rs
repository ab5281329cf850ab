//! Metrics collection and exposition.
//!
//! # Metrics
//! - `queue_router_messages_total` (counter): messages by dispatch outcome
//! - `queue_router_handler_duration_seconds` (histogram): handler latency by action
//! - `queue_router_batch_size` (histogram): messages per delivered batch
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Labels limited to outcome and action to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_outcome(outcome: &'static str) {
    ::metrics::counter!("queue_router_messages_total", "outcome" => outcome).increment(1);
}

pub fn record_handler_duration(action: &str, elapsed: Duration) {
    ::metrics::histogram!("queue_router_handler_duration_seconds", "action" => action.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_batch_size(size: usize) {
    ::metrics::histogram!("queue_router_batch_size").record(size as f64);
}
