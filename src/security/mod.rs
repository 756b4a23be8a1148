//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (order service only: X-User-Id → CurrentUser)
//!     → handler
//! Outgoing response:
//!     → headers.rs (CSP, Permissions-Policy, nosniff, per-service extras)
//! ```
//!
//! # Design Decisions
//! - Fail closed: requests without a known identity never reach a handler
//! - Header values are static; nothing echoes client input

pub mod access_control;
pub mod headers;
