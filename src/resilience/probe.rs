//! Retry probe decorator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::conditional::InnerFactory;
use crate::health::{Probe, ProbeContext, ProbeError, ProbeResult, RegistrationError};
use crate::resilience::options::RetryOptions;
use crate::resilience::retries::RetryStrategy;

/// Re-runs the inner probe through a [`RetryStrategy`].
///
/// The retried tag is added on every evaluation, whatever the outcome.
pub struct RetryProbe {
    factory: InnerFactory,
    strategy: Arc<dyn RetryStrategy>,
    options: RetryOptions,
}

impl RetryProbe {
    pub fn new(
        factory: InnerFactory,
        strategy: Arc<dyn RetryStrategy>,
        options: Option<RetryOptions>,
    ) -> Self {
        Self {
            factory,
            strategy,
            options: RetryOptions::merged(options),
        }
    }

    pub fn builder() -> RetryProbeBuilder {
        RetryProbeBuilder::default()
    }

    pub fn options(&self) -> &RetryOptions {
        &self.options
    }
}

#[async_trait]
impl Probe for RetryProbe {
    async fn check(
        &self,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        let tag = &self.options.retried_tag_name;
        ctx.tags().remove(tag);
        debug!(probe = %ctx.name(), "Probe will be retried");
        ctx.tags().insert(tag.clone());

        let recorder = Arc::new(ExecutionRecorder::new((self.factory)()));
        let result = self.strategy.execute(recorder.clone(), ctx, cancel).await?;

        if !recorder.was_called() {
            return Err(ProbeError::StrategyNeverInvoked {
                probe: ctx.name().to_string(),
            });
        }

        Ok(result)
    }
}

/// Tracks whether the wrapped probe ran at least once.
struct ExecutionRecorder {
    inner: Arc<dyn Probe>,
    called: AtomicBool,
}

impl ExecutionRecorder {
    fn new(inner: Arc<dyn Probe>) -> Self {
        Self {
            inner,
            called: AtomicBool::new(false),
        }
    }

    fn was_called(&self) -> bool {
        self.called.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Probe for ExecutionRecorder {
    async fn check(
        &self,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        self.called.store(true, Ordering::Release);
        self.inner.check(ctx, cancel).await
    }
}

/// Builder enforcing the required factory and strategy.
#[derive(Default)]
pub struct RetryProbeBuilder {
    factory: Option<InnerFactory>,
    strategy: Option<Arc<dyn RetryStrategy>>,
    options: Option<RetryOptions>,
}

impl RetryProbeBuilder {
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Probe> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn strategy<S>(mut self, strategy: S) -> Self
    where
        S: RetryStrategy + 'static,
    {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    pub fn options(mut self, options: RetryOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<RetryProbe, RegistrationError> {
        let factory = self.factory.ok_or(RegistrationError::MissingArgument("factory"))?;
        let strategy = self
            .strategy
            .ok_or(RegistrationError::MissingArgument("retry_strategy"))?;

        Ok(RetryProbe::new(factory, strategy, self.options))
    }
}
