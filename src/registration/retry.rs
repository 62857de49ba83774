//! Retry decoration entry points.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::conditional::InnerFactory;
use crate::health::{Probe, ProbeContext, ProbeError, ProbeFactory, ProbeResult, RegistrationError};
use crate::registration::builder::HealthChecksBuilder;
use crate::resilience::{FnRetryStrategy, RetryOptions, RetryProbe, RetryStrategy, WaitAndRetry};
use crate::resolver::Resolver;

/// Produces the retry strategy for one evaluation.
pub type StrategyFactory = Arc<dyn Fn(&Arc<Resolver>) -> Arc<dyn RetryStrategy> + Send + Sync>;

/// Wraps a factory so every probe it creates is retried by the strategy
/// `strategy` yields for that evaluation.
pub fn retry_decorator(
    strategy: StrategyFactory,
    options: Option<RetryOptions>,
) -> impl Fn(ProbeFactory) -> ProbeFactory {
    move |original: ProbeFactory| -> ProbeFactory {
        let strategy = strategy.clone();
        let options = options.clone();

        Arc::new(move |resolver: &Arc<Resolver>| -> Arc<dyn Probe> {
            let original = original.clone();
            let bound = resolver.clone();
            let inner: InnerFactory = Arc::new(move || original(&bound));

            Arc::new(RetryProbe::new(inner, strategy(resolver), options.clone()))
        })
    }
}

fn shared(strategy: impl RetryStrategy + 'static) -> StrategyFactory {
    let strategy: Arc<dyn RetryStrategy> = Arc::new(strategy);
    Arc::new(move |_: &Arc<Resolver>| strategy.clone())
}

impl HealthChecksBuilder {
    /// Retry the probe `retries` times, waiting `wait` (100ms by default)
    /// between attempts.
    pub fn retry(
        &mut self,
        name: &str,
        retries: usize,
        wait: Option<Duration>,
        options: Option<RetryOptions>,
    ) -> Result<&mut Self, RegistrationError> {
        self.retry_with(name, WaitAndRetry::times(retries, wait), options)
    }

    /// Retry once per interval, waiting that interval before each retry.
    pub fn retry_with_intervals(
        &mut self,
        name: &str,
        intervals: impl Into<Vec<Duration>>,
        options: Option<RetryOptions>,
    ) -> Result<&mut Self, RegistrationError> {
        self.retry_with(name, WaitAndRetry::new(intervals), options)
    }

    /// Retry with exponentially growing, jittered waits capped at `max`.
    pub fn retry_with_backoff(
        &mut self,
        name: &str,
        retries: usize,
        base: Duration,
        max: Duration,
        options: Option<RetryOptions>,
    ) -> Result<&mut Self, RegistrationError> {
        self.retry_with(name, WaitAndRetry::exponential(retries, base, max), options)
    }

    /// Retry through a custom strategy shared by every evaluation.
    pub fn retry_with<S>(
        &mut self,
        name: &str,
        strategy: S,
        options: Option<RetryOptions>,
    ) -> Result<&mut Self, RegistrationError>
    where
        S: RetryStrategy + 'static,
    {
        self.decorate_retry(name, shared(strategy), options)
    }

    /// Retry through a closure receiving the probe, the resolver, the
    /// evaluation context and the cancellation token.
    pub fn retry_with_fn<F, Fut>(
        &mut self,
        name: &str,
        strategy: F,
        options: Option<RetryOptions>,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(Arc<dyn Probe>, Arc<Resolver>, ProbeContext, CancellationToken) -> Fut
            + Clone
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<ProbeResult, ProbeError>> + Send + 'static,
    {
        let factory: StrategyFactory = Arc::new(move |resolver: &Arc<Resolver>| -> Arc<dyn RetryStrategy> {
            Arc::new(FnRetryStrategy::new(strategy.clone(), resolver.clone()))
        });
        self.decorate_retry(name, factory, options)
    }

    fn decorate_retry(
        &mut self,
        name: &str,
        strategy: StrategyFactory,
        options: Option<RetryOptions>,
    ) -> Result<&mut Self, RegistrationError> {
        let options = options.or_else(|| self.retry_defaults.clone());
        self.registry.decorate(name, retry_decorator(strategy, options))?;
        Ok(self)
    }
}
