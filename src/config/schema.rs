//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::conditional::ConditionalOptions;
use crate::resilience::{RetryOptions, WaitAndRetry};

/// Root configuration for hosts of the health check extensions.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Defaults applied to conditional registrations.
    pub conditional: ConditionalOptions,

    /// Defaults applied to retried registrations.
    pub retry: RetryConfig,

    /// Health service settings.
    pub service: ServiceConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of retries after the first attempt.
    pub retries: usize,

    /// Wait between attempts in milliseconds.
    pub wait_ms: u64,

    /// Tag added to retried probes.
    pub retried_tag_name: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            wait_ms: 100,
            retried_tag_name: crate::resilience::options::DEFAULT_RETRIED_TAG_NAME.to_string(),
        }
    }
}

impl RetryConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn strategy(&self) -> WaitAndRetry {
        WaitAndRetry::times(self.retries, Some(self.wait()))
    }

    pub fn options(&self) -> RetryOptions {
        RetryOptions::default().with_retried_tag_name(self.retried_tag_name.clone())
    }
}

/// Health service configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upper bound for a whole health evaluation in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { timeout_ms: 30_000 }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
