//! Metrics collection and exposition.
//!
//! # Metrics
//! - `admission_decisions_total` (counter): decisions by outcome
//! - `admission_bans_total` (counter): escalations to banned
//! - `admission_unbans_total` (counter): removals by reason
//!   (expired, reconciled, manual)
//! - `admission_tracked_addresses` (gauge): current registry size

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(outcome: &'static str) {
    metrics::counter!("admission_decisions_total", "outcome" => outcome).increment(1);
}

pub fn record_ban() {
    metrics::counter!("admission_bans_total").increment(1);
}

pub fn record_unban(reason: &'static str) {
    metrics::counter!("admission_unbans_total", "reason" => reason).increment(1);
}

pub fn record_tracked(count: usize) {
    metrics::gauge!("admission_tracked_addresses").set(count as f64);
}
