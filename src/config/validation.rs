//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Reject tag names and log filters that cannot be used
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExtensionsConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ExtensionsConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("observability.log_level `{0}` is not a valid filter directive")]
    InvalidLogLevel(String),

    #[error("conditional.skipped_tag_name must not be empty")]
    EmptySkippedTagName,

    #[error("retry.retried_tag_name must not be empty")]
    EmptyRetriedTagName,

    #[error("service.timeout_ms must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_config(config: &ExtensionsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.conditional.skipped_tag_name.trim().is_empty() {
        errors.push(ValidationError::EmptySkippedTagName);
    }

    if config.retry.retried_tag_name.trim().is_empty() {
        errors.push(ValidationError::EmptyRetriedTagName);
    }

    if config.service.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
