//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject Argon2 parameters the hasher would refuse at startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LabConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::LabConfig;

/// Longest accepted session lifetime (one year). Expiry is computed as
/// `now + ttl`, which must stay representable.
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `auth.session_ttl_secs`).
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LabConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "files.bind_address", &config.files.bind_address);
    check_address(&mut errors, "auth.bind_address", &config.auth.bind_address);
    check_address(&mut errors, "orders.bind_address", &config.orders.bind_address);

    if config.files.base_dir.trim().is_empty() {
        errors.push(ValidationError::new("files.base_dir", "must not be empty"));
    }

    match config.auth.session_ttl_secs {
        0 => errors.push(ValidationError::new("auth.session_ttl_secs", "must be greater than 0")),
        ttl if ttl > MAX_SESSION_TTL_SECS => errors.push(ValidationError::new(
            "auth.session_ttl_secs",
            format!("must not exceed {} seconds", MAX_SESSION_TTL_SECS),
        )),
        _ => {}
    }

    if !is_cookie_token(&config.auth.cookie_name) {
        errors.push(ValidationError::new(
            "auth.cookie_name",
            "must be a non-empty cookie token",
        ));
    }

    let hash = &config.auth.password_hash;
    if let Err(e) = argon2::Params::new(hash.memory_kib, hash.iterations, hash.parallelism, None) {
        errors.push(ValidationError::new("auth.password_hash", e.to_string()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            field,
            format!("'{}' is not a valid socket address", value),
        ));
    }
}

/// RFC 6265 cookie-name token: visible ASCII minus separators.
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LabConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = LabConfig::default();
        config.files.bind_address = "not-an-address".into();
        config.auth.session_ttl_secs = 0;
        config.auth.cookie_name = "bad name".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "files.bind_address",
                "auth.session_ttl_secs",
                "auth.cookie_name",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_rejects_argon2_params_below_minimum() {
        let mut config = LabConfig::default();
        config.auth.password_hash.memory_kib = 1;
        config.auth.password_hash.iterations = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "auth.password_hash");
    }

    #[test]
    fn test_session_ttl_upper_bound() {
        let mut config = LabConfig::default();
        config.auth.session_ttl_secs = MAX_SESSION_TTL_SECS;
        assert!(validate_config(&config).is_ok());

        for ttl in [MAX_SESSION_TTL_SECS + 1, u64::MAX] {
            config.auth.session_ttl_secs = ttl;
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "auth.session_ttl_secs");
        }
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = LabConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
