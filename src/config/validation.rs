//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks on value ranges
//! - Keep the listener on the loopback interface
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: TargetConfig → Result<(), Vec<ValidationError>>

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::config::schema::TargetConfig;

/// A single semantic problem with a [`TargetConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start port must be between 1 and 65535")]
    ZeroStartPort,

    #[error("max port attempts must be at least 1")]
    NoAttempts,

    #[error("listener host {0} is not a loopback address")]
    NonLoopbackHost(Ipv4Addr),

    #[error("body limit must be greater than zero")]
    ZeroBodyLimit,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &TargetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.start_port == 0 {
        errors.push(ValidationError::ZeroStartPort);
    }
    if config.listener.max_attempts == 0 {
        errors.push(ValidationError::NoAttempts);
    }
    if !config.listener.host.is_loopback() {
        errors.push(ValidationError::NonLoopbackHost(config.listener.host));
    }
    if config.limits.body_limit_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
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

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&TargetConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = TargetConfig::with_start_port(0);
        config.listener.max_attempts = 0;
        config.listener.host = Ipv4Addr::UNSPECIFIED;
        config.limits.body_limit_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroStartPort,
                ValidationError::NoAttempts,
                ValidationError::NonLoopbackHost(Ipv4Addr::UNSPECIFIED),
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn any_loopback_host_is_accepted() {
        let mut config = TargetConfig::default();
        config.listener.host = Ipv4Addr::new(127, 0, 0, 2);
        assert!(validate_config(&config).is_ok());
    }
}
