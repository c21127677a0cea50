//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (non-empty port range, timeouts > 0)
//! - Check that the host forms a usable base URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockConfig → Result<(), Vec<ValidationError>>
//! - Runs before any port is probed

use thiserror::Error;
use url::Url;

use crate::config::schema::MockConfig;

/// A single semantic problem with a [`MockConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("port range {start}..{end} is empty")]
    EmptyPortRange { start: u16, end: u16 },

    #[error("port range must not start at port 0")]
    ZeroPort,

    #[error("host must not be empty")]
    EmptyHost,

    #[error("host {0:?} does not form a valid base URL")]
    InvalidHost(String),

    #[error("max_bind_attempts must be greater than zero")]
    ZeroBindAttempts,

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("body_limit_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let range = config.port_range;
    if range.start == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if range.is_empty() {
        errors.push(ValidationError::EmptyPortRange {
            start: range.start,
            end: range.end,
        });
    }

    if config.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    } else if Url::parse(&format!("http://{}:{}/", config.host, range.start)).is_err() {
        errors.push(ValidationError::InvalidHost(config.host.clone()));
    }

    if config.max_bind_attempts == Some(0) {
        errors.push(ValidationError::ZeroBindAttempts);
    }
    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.body_limit_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PortRange;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MockConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = MockConfig {
            host: " ".to_string(),
            port_range: PortRange::new(0, 0),
            max_bind_attempts: Some(0),
            request_timeout_secs: 0,
            body_limit_bytes: 0,
            ..MockConfig::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroPort,
                ValidationError::EmptyPortRange { start: 0, end: 0 },
                ValidationError::EmptyHost,
                ValidationError::ZeroBindAttempts,
                ValidationError::ZeroTimeout,
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn test_invalid_host() {
        let config = MockConfig {
            host: "not a host".to_string(),
            ..MockConfig::default()
        };
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidHost("not a host".to_string())]
        );
    }

    #[test]
    fn test_unbounded_attempts_allowed() {
        let config = MockConfig {
            max_bind_attempts: None,
            ..MockConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}
