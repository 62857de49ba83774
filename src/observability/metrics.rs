//! Metrics collection.
//!
//! # Metrics
//! - `probe_evaluations_total` (counter): evaluations by probe, status
//! - `probe_skipped_total` (counter): conditional probes not run
//! - `probe_retry_attempts_total` (counter): extra attempts made by retry strategies
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; exposition is up to the host
//! - Labels for probe name and status only

use crate::health::HealthStatus;

pub fn record_probe_evaluation(probe: &str, status: HealthStatus) {
    ::metrics::counter!(
        "probe_evaluations_total",
        "probe" => probe.to_string(),
        "status" => status.as_str()
    )
    .increment(1);
}

pub fn record_probe_skipped(probe: &str) {
    ::metrics::counter!("probe_skipped_total", "probe" => probe.to_string()).increment(1);
}

pub fn record_retry_attempt(probe: &str) {
    ::metrics::counter!("probe_retry_attempts_total", "probe" => probe.to_string()).increment(1);
}
