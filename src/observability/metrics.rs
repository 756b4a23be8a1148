//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lab_path_rejections_total` (counter): traversal attempts refused
//! - `lab_login_attempts_total` (counter): logins by `outcome`
//! - `lab_sessions_expired_total` (counter): sessions dropped at lookup
//! - `lab_order_access_total` (counter): order lookups by `outcome`
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_path_rejection() {
    ::metrics::counter!("lab_path_rejections_total").increment(1);
}

pub fn record_login(outcome: &'static str) {
    ::metrics::counter!("lab_login_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_session_expired() {
    ::metrics::counter!("lab_sessions_expired_total").increment(1);
}

pub fn record_order_access(outcome: &'static str) {
    ::metrics::counter!("lab_order_access_total", "outcome" => outcome).increment(1);
}
