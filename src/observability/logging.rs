//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Honour `RUST_LOG`, falling back to the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Session tokens and passwords are never recorded as fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a configured log level.
pub fn default_directive(log_level: &str) -> String {
    format!("vuln_labs={},tower_http=debug", log_level)
}

/// Install the global subscriber.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
