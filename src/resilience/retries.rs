//! Retry strategies.
//!
//! # Responsibilities
//! - Define the strategy seam used by the retry decorator
//! - Provide the default wait-and-retry strategy
//! - Adapt closures (e.g. wrapping a third-party resilience policy) to the seam
//!
//! # Design Decisions
//! - A run is retried while its status is anything but Healthy
//! - The final attempt's result is returned as-is; exhausting the retries is
//!   not an error
//! - Waits between attempts honor cancellation and surface it as
//!   `ProbeError::Cancelled` instead of running another attempt

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::health::{HealthStatus, Probe, ProbeContext, ProbeError, ProbeResult};
use crate::observability::metrics;
use crate::resilience::backoff::backoff_intervals;
use crate::resolver::Resolver;

/// Default wait applied between attempts by [`WaitAndRetry::times`].
pub const DEFAULT_WAIT_BETWEEN_RETRIES: Duration = Duration::from_millis(100);

/// Controls how many times, and with what delay, a probe is re-run.
///
/// Implementations must run `probe` at least once; the retry decorator
/// rejects results produced without doing so.
#[async_trait]
pub trait RetryStrategy: Send + Sync {
    async fn execute(
        &self,
        probe: Arc<dyn Probe>,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError>;
}

/// Runs the probe once, then once more after each wait interval until a
/// Healthy result is obtained or the intervals are exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitAndRetry {
    schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Schedule {
    Fixed(Vec<Duration>),
    Exponential {
        retries: usize,
        base: Duration,
        max: Duration,
    },
}

impl WaitAndRetry {
    /// Retry once per interval, waiting that interval first.
    pub fn new(intervals: impl Into<Vec<Duration>>) -> Self {
        Self {
            schedule: Schedule::Fixed(intervals.into()),
        }
    }

    /// Retry `retries` times with the same wait, 100ms unless given.
    pub fn times(retries: usize, wait: Option<Duration>) -> Self {
        Self::new(vec![wait.unwrap_or(DEFAULT_WAIT_BETWEEN_RETRIES); retries])
    }

    /// Retry `retries` times with exponentially growing, jittered waits.
    ///
    /// Jitter is drawn again for every run.
    pub fn exponential(retries: usize, base: Duration, max: Duration) -> Self {
        Self {
            schedule: Schedule::Exponential { retries, base, max },
        }
    }

    /// Waits for one run of the strategy.
    pub fn intervals(&self) -> Vec<Duration> {
        match &self.schedule {
            Schedule::Fixed(intervals) => intervals.clone(),
            Schedule::Exponential { retries, base, max } => {
                backoff_intervals(*retries, *base, *max)
            }
        }
    }

    pub fn retries(&self) -> usize {
        match &self.schedule {
            Schedule::Fixed(intervals) => intervals.len(),
            Schedule::Exponential { retries, .. } => *retries,
        }
    }
}

#[async_trait]
impl RetryStrategy for WaitAndRetry {
    async fn execute(
        &self,
        probe: Arc<dyn Probe>,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        let intervals = self.intervals();
        let total = intervals.len() + 1;
        let mut waits = intervals.iter();
        let mut attempt = 1;

        loop {
            debug!(probe = %ctx.name(), attempt, total, "Running probe attempt");
            let result = probe.check(ctx, cancel).await?;

            if result.status == HealthStatus::Healthy {
                return Ok(result);
            }

            let Some(wait) = waits.next() else {
                debug!(
                    probe = %ctx.name(),
                    status = %result.status,
                    attempts = attempt,
                    "Retries exhausted"
                );
                return Ok(result);
            };

            debug!(
                probe = %ctx.name(),
                status = %result.status,
                wait_ms = wait.as_millis() as u64,
                "Probe not healthy, retrying after wait"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(probe = %ctx.name(), attempt, "Retry wait cancelled");
                    return Err(ProbeError::Cancelled);
                }
                _ = tokio::time::sleep(*wait) => {}
            }

            attempt += 1;
            metrics::record_retry_attempt(ctx.name());
        }
    }
}

/// Strategy backed by a closure receiving the probe, the resolver, the
/// context and the cancellation token.
pub struct FnRetryStrategy<F> {
    strategy: F,
    resolver: Arc<Resolver>,
}

impl<F, Fut> FnRetryStrategy<F>
where
    F: Fn(Arc<dyn Probe>, Arc<Resolver>, ProbeContext, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ProbeResult, ProbeError>> + Send + 'static,
{
    pub fn new(strategy: F, resolver: Arc<Resolver>) -> Self {
        Self { strategy, resolver }
    }
}

#[async_trait]
impl<F, Fut> RetryStrategy for FnRetryStrategy<F>
where
    F: Fn(Arc<dyn Probe>, Arc<Resolver>, ProbeContext, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ProbeResult, ProbeError>> + Send + 'static,
{
    async fn execute(
        &self,
        probe: Arc<dyn Probe>,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        (self.strategy)(probe, self.resolver.clone(), ctx.clone(), cancel.clone()).await
    }
}

impl<F> fmt::Debug for FnRetryStrategy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRetryStrategy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the statuses in order, repeating the last one.
    struct Scripted {
        statuses: Vec<HealthStatus>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(statuses: Vec<HealthStatus>) -> Arc<Self> {
            Arc::new(Self {
                statuses,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Probe for Scripted {
        async fn check(
            &self,
            _ctx: &ProbeContext,
            _cancel: &CancellationToken,
        ) -> Result<ProbeResult, ProbeError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let status = self.statuses[call.min(self.statuses.len() - 1)];
            Ok(ProbeResult::new(status, format!("call {}", call + 1)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_unhealthy_runs_every_attempt() {
        let probe = Scripted::new(vec![HealthStatus::Unhealthy]);
        let strategy = WaitAndRetry::new(vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
        ]);

        let started = tokio::time::Instant::now();
        let result = strategy
            .execute(probe.clone(), &ProbeContext::named("db"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(probe.calls(), 4);
        assert_eq!(result.status, HealthStatus::Unhealthy);
        assert_eq!(result.description, "call 4");
        assert!(started.elapsed() >= Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_first_healthy() {
        let probe = Scripted::new(vec![HealthStatus::Unhealthy, HealthStatus::Healthy]);
        let strategy = WaitAndRetry::times(5, None);

        let result = strategy
            .execute(probe.clone(), &ProbeContext::named("db"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(probe.calls(), 2);
        assert_eq!(result.status, HealthStatus::Healthy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_degraded_is_retried() {
        let probe = Scripted::new(vec![HealthStatus::Degraded, HealthStatus::Degraded, HealthStatus::Healthy]);
        let strategy = WaitAndRetry::times(1, Some(Duration::from_millis(10)));

        let result = strategy
            .execute(probe.clone(), &ProbeContext::named("db"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(probe.calls(), 2);
        assert_eq!(result.status, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn test_no_intervals_runs_once() {
        let probe = Scripted::new(vec![HealthStatus::Unhealthy]);
        let result = WaitAndRetry::new(Vec::new())
            .execute(probe.clone(), &ProbeContext::named("db"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(probe.calls(), 1);
        assert_eq!(result.status, HealthStatus::Unhealthy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_wait() {
        let probe = Scripted::new(vec![HealthStatus::Unhealthy]);
        let strategy = WaitAndRetry::times(3, Some(Duration::from_secs(60)));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = strategy
            .execute(probe.clone(), &ProbeContext::named("db"), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(probe.calls(), 1);
    }

    #[test]
    fn test_times_defaults_wait() {
        let strategy = WaitAndRetry::times(3, None);
        assert_eq!(strategy.retries(), 3);
        assert!(strategy.intervals().iter().all(|w| *w == DEFAULT_WAIT_BETWEEN_RETRIES));
    }

    #[test]
    fn test_exponential_redraws_jitter_per_run() {
        let strategy = WaitAndRetry::exponential(3, Duration::from_secs(1), Duration::from_secs(8));
        assert_eq!(strategy.retries(), 3);

        let runs: std::collections::BTreeSet<Vec<Duration>> =
            (0..20).map(|_| strategy.intervals()).collect();
        assert!(runs.len() > 1);
        for run in &runs {
            assert!(run[0] >= Duration::from_secs(1) && run[0] < Duration::from_millis(1100));
            assert!(run[2] >= Duration::from_secs(4) && run[2] < Duration::from_millis(4400));
        }
    }

    #[tokio::test]
    async fn test_fn_strategy_receives_resolver() {
        let resolver = Arc::new(Resolver::new().with(3usize));
        let strategy = FnRetryStrategy::new(
            |probe: Arc<dyn Probe>, resolver: Arc<Resolver>, ctx: ProbeContext, cancel: CancellationToken| async move {
                let attempts = *resolver.get::<usize>().unwrap();
                let mut result = probe.check(&ctx, &cancel).await?;
                for _ in 1..attempts {
                    result = probe.check(&ctx, &cancel).await?;
                }
                Ok(result)
            },
            resolver,
        );

        let probe = Scripted::new(vec![HealthStatus::Unhealthy]);
        strategy
            .execute(probe.clone(), &ProbeContext::named("db"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(probe.calls(), 3);
    }
}
