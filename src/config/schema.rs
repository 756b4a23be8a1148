//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the lab services.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by all three services.
///
/// Each service only reads its own section plus the cross-cutting ones.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LabConfig {
    /// File access service (path traversal demo).
    pub files: FilesConfig,

    /// Session authentication service.
    pub auth: AuthConfig,

    /// Order lookup service (IDOR demo).
    pub orders: OrdersConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Response headers and request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// File access service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Bind address (e.g., "127.0.0.1:4000").
    pub bind_address: String,

    /// Confinement boundary for every resolved path.
    /// Relative values are resolved against the working directory at startup.
    pub base_dir: String,

    /// Mount the deliberately unguarded `/read-no-validate` route.
    pub expose_unvalidated_route: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:4000".to_string(),
            base_dir: "files".to_string(),
            expose_unvalidated_route: true,
        }
    }
}

/// Session authentication service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bind address (e.g., "127.0.0.1:3001").
    pub bind_address: String,

    /// Session lifetime in seconds. Also used as the cookie Max-Age.
    pub session_ttl_secs: u64,

    /// Name of the session cookie.
    pub cookie_name: String,

    /// Add the `Secure` attribute to the session cookie (HTTPS deployments).
    pub cookie_secure: bool,

    /// Argon2id cost parameters used when hashing the seed accounts.
    pub password_hash: PasswordHashConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            session_ttl_secs: 60 * 60,
            cookie_name: "session".to_string(),
            cookie_secure: false,
            password_hash: PasswordHashConfig::default(),
        }
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,

    /// Number of passes.
    pub iterations: u32,

    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        // argon2 crate defaults (OWASP minimum for Argon2id)
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Order lookup service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 100 * 1024, // 100KB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
