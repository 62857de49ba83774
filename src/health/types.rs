//! Probe result model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Health status reported by a probe.
///
/// Ordered from worst to best so that `min` over a set of statuses yields
/// the aggregate status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Unhealthy,
    Degraded,
    Healthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Healthy => "healthy",
        }
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        HealthStatus::Healthy
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a single probe evaluation.
///
/// Produced by probes or synthesized by decorators. Immutable once built;
/// the `with_*` methods consume and return a new value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProbeResult {
    pub status: HealthStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn new(status: HealthStatus, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            data: BTreeMap::new(),
            error: None,
        }
    }

    pub fn healthy(description: impl Into<String>) -> Self {
        Self::new(HealthStatus::Healthy, description)
    }

    pub fn degraded(description: impl Into<String>) -> Self {
        Self::new(HealthStatus::Degraded, description)
    }

    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self::new(HealthStatus::Unhealthy, description)
    }

    /// Attach a data entry to the result.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attach error information to the result.
    pub fn with_error(mut self, error: impl fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering_is_worst_first() {
        assert!(HealthStatus::Unhealthy < HealthStatus::Degraded);
        assert!(HealthStatus::Degraded < HealthStatus::Healthy);

        let worst = [HealthStatus::Healthy, HealthStatus::Degraded, HealthStatus::Healthy]
            .into_iter()
            .min()
            .unwrap();
        assert_eq!(worst, HealthStatus::Degraded);
    }

    #[test]
    fn test_result_serializes_lowercase_status() {
        let result = ProbeResult::degraded("slow")
            .with_data("latency_ms", 1200)
            .with_error("timeout");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["data"]["latency_ms"], 1200);
        assert_eq!(json["error"], "timeout");
    }

    #[test]
    fn test_result_omits_empty_fields() {
        let json = serde_json::to_value(ProbeResult::healthy("ok")).unwrap();
        assert!(json.get("data").is_none());
        assert!(json.get("error").is_none());
    }
}
