//! Conditional probe decorator.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::conditional::options::ConditionalOptions;
use crate::conditional::predicate::Predicate;
use crate::health::{Probe, ProbeContext, ProbeError, ProbeResult, RegistrationError};
use crate::observability::metrics;
use crate::resolver::Resolver;

/// Produces the wrapped probe bound to an already chosen resolver.
pub type InnerFactory = Arc<dyn Fn() -> Arc<dyn Probe> + Send + Sync>;

/// Runs the inner probe only when its predicate holds.
///
/// On skip the inner probe is never instantiated; a substitute result with
/// [`ConditionalOptions::status_when_skipped`] is returned and the skip tag is
/// added to the context.
pub struct ConditionalProbe {
    factory: InnerFactory,
    predicate: Predicate,
    resolver: Arc<Resolver>,
    options: ConditionalOptions,
}

impl ConditionalProbe {
    pub fn new(
        factory: InnerFactory,
        predicate: Predicate,
        resolver: Arc<Resolver>,
        options: Option<ConditionalOptions>,
    ) -> Self {
        Self {
            factory,
            predicate,
            resolver,
            options: ConditionalOptions::merged(options),
        }
    }

    pub fn builder() -> ConditionalProbeBuilder {
        ConditionalProbeBuilder::default()
    }

    pub fn options(&self) -> &ConditionalOptions {
        &self.options
    }

    fn skipped(&self, name: &str) -> ProbeResult {
        ProbeResult::new(
            self.options.status_when_skipped,
            format!(
                "{} will not be evaluated as its checking condition is not met. \
                 This does not mean the dependency is healthy, but the check is not configured to run yet.",
                name
            ),
        )
    }
}

#[async_trait]
impl Probe for ConditionalProbe {
    async fn check(
        &self,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        let tag = &self.options.skipped_tag_name;
        ctx.tags().remove(tag);

        let should_run = self
            .predicate
            .evaluate(self.resolver.clone(), ctx.clone(), cancel.clone())
            .await?;

        if !should_run {
            debug!(
                probe = %ctx.name(),
                "Probe will not be evaluated as its checking condition is not met"
            );
            ctx.tags().insert(tag.clone());
            metrics::record_probe_skipped(ctx.name());
            return Ok(self.skipped(ctx.name()));
        }

        (self.factory)().check(ctx, cancel).await
    }
}

/// Builder enforcing the required factory and predicate.
#[derive(Default)]
pub struct ConditionalProbeBuilder {
    factory: Option<InnerFactory>,
    predicate: Option<Predicate>,
    resolver: Option<Arc<Resolver>>,
    options: Option<ConditionalOptions>,
}

impl ConditionalProbeBuilder {
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Probe> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn predicate(mut self, predicate: impl Into<Predicate>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn resolver(mut self, resolver: Arc<Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn options(mut self, options: ConditionalOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<ConditionalProbe, RegistrationError> {
        let factory = self.factory.ok_or(RegistrationError::MissingArgument("factory"))?;
        let predicate = self
            .predicate
            .ok_or(RegistrationError::MissingArgument("predicate"))?;

        Ok(ConditionalProbe::new(
            factory,
            predicate,
            self.resolver.unwrap_or_default(),
            self.options,
        ))
    }
}
