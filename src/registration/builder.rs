//! Registry builder used by hosts during configuration.

use std::sync::Arc;

use crate::conditional::ConditionalOptions;
use crate::health::{
    HealthCheckService, Probe, ProbeRegistration, ProbeRegistry, ProbeResult,
};
use crate::resilience::RetryOptions;
use crate::resolver::Resolver;

/// Collects probe registrations and applies decorations to them.
///
/// Decoration entry points live in `conditional.rs` and `retry.rs`; the
/// default options set here apply when a call passes `None`.
#[derive(Debug, Default)]
pub struct HealthChecksBuilder {
    pub(crate) registry: ProbeRegistry,
    pub(crate) conditional_defaults: Option<ConditionalOptions>,
    pub(crate) retry_defaults: Option<RetryOptions>,
}

impl HealthChecksBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue configuring an existing registry.
    pub fn from_registry(registry: ProbeRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Options used by conditional decorations that do not supply their own.
    pub fn with_conditional_defaults(&mut self, options: ConditionalOptions) -> &mut Self {
        self.conditional_defaults = Some(options);
        self
    }

    /// Options used by retry decorations that do not supply their own.
    pub fn with_retry_defaults(&mut self, options: RetryOptions) -> &mut Self {
        self.retry_defaults = Some(options);
        self
    }

    pub fn add_registration(&mut self, registration: ProbeRegistration) -> &mut Self {
        self.registry.register(registration);
        self
    }

    /// Register a probe instance shared by every evaluation.
    pub fn add_probe<P>(&mut self, name: impl Into<String>, probe: P) -> &mut Self
    where
        P: Probe + 'static,
    {
        self.add_registration(ProbeRegistration::from_probe(name, probe))
    }

    /// Register a probe created per evaluation from the resolver.
    pub fn add_check<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Arc<Resolver>) -> Arc<dyn Probe> + Send + Sync + 'static,
    {
        self.add_registration(ProbeRegistration::from_factory(name, factory))
    }

    pub fn add_fn_check<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn() -> ProbeResult + Send + Sync + 'static,
    {
        self.add_registration(ProbeRegistration::from_fn(name, check))
    }

    pub fn add_fn_check_with_tags<F, I, S>(
        &mut self,
        name: impl Into<String>,
        check: F,
        tags: I,
    ) -> &mut Self
    where
        F: Fn() -> ProbeResult + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_registration(ProbeRegistration::from_fn(name, check).with_tags(tags))
    }

    pub fn registry(&self) -> &ProbeRegistry {
        &self.registry
    }

    pub fn build(self) -> ProbeRegistry {
        self.registry
    }

    /// Finish configuration and hand the registry to an evaluation service.
    pub fn into_service(self, resolver: Arc<Resolver>) -> HealthCheckService {
        HealthCheckService::new(self.registry, resolver)
    }
}
