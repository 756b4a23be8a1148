//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and decision logic produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (decision counters)
//! tower-http produces:
//!     → per-request spans tagged with x-request-id
//! ```

pub mod logging;
pub mod metrics;
