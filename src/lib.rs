//! Security lab services.
//!
//! Three small HTTP services, each showing one vulnerability class and its fix:
//!
//! - [`files`]: path traversal, with a confined resolver and an unguarded
//!   counterpart for comparison
//! - [`auth`]: cookie sessions with Argon2id credentials, random tokens and
//!   lazy expiry
//! - [`orders`]: insecure direct object reference, guarded by an ownership check
//!
//! Each service runs on its own via [`http::LabServer`].

// Services
pub mod auth;
pub mod files;
pub mod orders;

// Cross-cutting concerns
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::LabConfig;
pub use http::{LabServer, Service};
pub use lifecycle::Shutdown;
