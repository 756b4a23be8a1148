//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LabConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a configuration file was refused.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LabConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LabConfig, ConfigError> {
    let config: LabConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.auth.cookie_name, "session");
    }

    #[test]
    fn test_semantic_errors_are_reported() {
        let err = parse_config("[auth]\nsession_ttl_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
        assert!(err.to_string().contains("auth.session_ttl_secs"));
    }

    #[test]
    fn test_reports_every_validation_error() {
        let err = parse_config("[auth]\nsession_ttl_secs = 9223372036854775807\ncookie_name = \"a b\"\n")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid config: "));
        assert!(message.contains("auth.session_ttl_secs: must not exceed"));
        assert!(message.contains("; auth.cookie_name"));
    }

    #[test]
    fn test_syntax_errors_are_parse_errors() {
        let err = parse_config("[files\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
