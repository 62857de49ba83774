//! Health evaluation over a whole registry.
//!
//! # Responsibilities
//! - Instantiate each registered probe through its (possibly decorated) factory
//! - Evaluate all probes concurrently, each with its own context
//! - Map probe errors to the registration's failure status
//! - Aggregate entries into a report with the worst status
//!
//! # Design Decisions
//! - One cancellation token per evaluation cycle, cancelled on timeout
//! - Tags are read back from each entry's context after its probe returns

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::health::context::ProbeContext;
use crate::health::error::ProbeError;
use crate::health::registration::ProbeRegistration;
use crate::health::registry::ProbeRegistry;
use crate::health::types::{HealthStatus, ProbeResult};
use crate::observability::metrics;
use crate::resolver::Resolver;

/// Result of evaluating one registration.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReportEntry {
    pub name: String,
    pub status: HealthStatus,
    pub description: String,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub tags: Vec<String>,
}

/// Aggregated result of one evaluation cycle.
///
/// Entries follow registration order. Registrations sharing a name each keep
/// their own entry.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub total_duration_ms: u64,
    pub entries: Vec<HealthReportEntry>,
}

impl HealthReport {
    /// First entry registered under `name`.
    pub fn entry(&self, name: &str) -> Option<&HealthReportEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Every entry registered under `name`, in registration order.
    pub fn entries_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HealthReportEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.name == name)
    }
}

/// How long a probe may keep running after its evaluation was cancelled.
pub const DEFAULT_CANCELLATION_GRACE: Duration = Duration::from_secs(1);

/// Evaluates every registration of a registry.
pub struct HealthCheckService {
    registry: ProbeRegistry,
    resolver: Arc<Resolver>,
    timeout: Option<Duration>,
    grace: Duration,
}

impl HealthCheckService {
    pub fn new(registry: ProbeRegistry, resolver: Arc<Resolver>) -> Self {
        Self {
            registry,
            resolver,
            timeout: None,
            grace: DEFAULT_CANCELLATION_GRACE,
        }
    }

    /// Cancel the cycle once `timeout` has elapsed.
    ///
    /// Probes that ignore cancellation are abandoned after the cancellation
    /// grace period and reported as cancelled.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bound on how long a cancelled probe may keep running.
    pub fn with_cancellation_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn registry(&self) -> &ProbeRegistry {
        &self.registry
    }

    /// Run one evaluation cycle.
    pub async fn check_health(&self) -> HealthReport {
        self.check_health_with(&CancellationToken::new()).await
    }

    /// Run one evaluation cycle tied to an external cancellation signal.
    pub async fn check_health_with(&self, cancel: &CancellationToken) -> HealthReport {
        let started = Instant::now();
        let cycle = cancel.child_token();

        let evaluations = join_all(
            self.registry
                .iter()
                .map(|registration| self.evaluate(registration, &cycle)),
        );
        tokio::pin!(evaluations);

        let entries = match self.timeout {
            Some(timeout) => {
                tokio::select! {
                    entries = &mut evaluations => entries,
                    _ = tokio::time::sleep(timeout) => {
                        tracing::warn!(
                            timeout_ms = timeout.as_millis() as u64,
                            "Health evaluation timed out, cancelling remaining probes"
                        );
                        cycle.cancel();
                        evaluations.await
                    }
                }
            }
            None => evaluations.await,
        };

        let status = entries
            .iter()
            .map(|entry| entry.status)
            .min()
            .unwrap_or(HealthStatus::Healthy);

        HealthReport {
            status,
            total_duration_ms: started.elapsed().as_millis() as u64,
            entries,
        }
    }

    async fn evaluate(
        &self,
        registration: &ProbeRegistration,
        cancel: &CancellationToken,
    ) -> HealthReportEntry {
        let started = Instant::now();
        let ctx = ProbeContext::new(registration);
        let probe = registration.create_probe(&self.resolver);

        let abandoned = async {
            cancel.cancelled().await;
            tokio::time::sleep(self.grace).await;
        };
        let outcome = tokio::select! {
            biased;
            outcome = probe.check(&ctx, cancel) => outcome,
            _ = abandoned => {
                tracing::warn!(
                    probe = %registration.name(),
                    grace_ms = self.grace.as_millis() as u64,
                    "Probe ignored cancellation, abandoning it"
                );
                Err(ProbeError::Cancelled)
            }
        };

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(probe = %registration.name(), error = %e, "Probe evaluation failed");
                ProbeResult::new(registration.failure_status(), e.to_string()).with_error(&e)
            }
        };

        metrics::record_probe_evaluation(registration.name(), result.status);

        HealthReportEntry {
            name: registration.name().to_string(),
            status: result.status,
            description: result.description,
            duration_ms: started.elapsed().as_millis() as u64,
            data: result.data,
            error: result.error,
            tags: ctx.tags().to_vec(),
        }
    }
}
