//! Named probe registrations.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::health::probe::{FnProbe, Probe};
use crate::health::types::{HealthStatus, ProbeResult};
use crate::resolver::Resolver;

/// Produces a probe instance for one evaluation.
pub type ProbeFactory = Arc<dyn Fn(&Arc<Resolver>) -> Arc<dyn Probe> + Send + Sync>;

/// A probe registered under a name.
///
/// Only the factory is replaced when a registration is decorated; the name,
/// tags and failure status stay as the host registered them.
#[derive(Clone)]
pub struct ProbeRegistration {
    name: String,
    factory: ProbeFactory,
    tags: BTreeSet<String>,
    failure_status: HealthStatus,
}

impl ProbeRegistration {
    pub fn new(name: impl Into<String>, factory: ProbeFactory) -> Self {
        Self {
            name: name.into(),
            factory,
            tags: BTreeSet::new(),
            failure_status: HealthStatus::Unhealthy,
        }
    }

    /// Register a probe created per evaluation by `factory`.
    pub fn from_factory<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Arc<Resolver>) -> Arc<dyn Probe> + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(factory))
    }

    /// Register a single shared probe instance.
    pub fn from_probe<P>(name: impl Into<String>, probe: P) -> Self
    where
        P: Probe + 'static,
    {
        let probe: Arc<dyn Probe> = Arc::new(probe);
        Self::from_factory(name, move |_| probe.clone())
    }

    /// Register a probe backed by a plain closure.
    pub fn from_fn<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> ProbeResult + Send + Sync + 'static,
    {
        Self::from_probe(name, FnProbe::new(check))
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_failure_status(mut self, status: HealthStatus) -> Self {
        self.failure_status = status;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> &ProbeFactory {
        &self.factory
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn failure_status(&self) -> HealthStatus {
        self.failure_status
    }

    /// Instantiate the (possibly decorated) probe.
    pub fn create_probe(&self, resolver: &Arc<Resolver>) -> Arc<dyn Probe> {
        (self.factory)(resolver)
    }

    pub(crate) fn set_factory(&mut self, factory: ProbeFactory) {
        self.factory = factory;
    }

    /// Case-insensitive name comparison used for lookups.
    pub fn matches(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

impl fmt::Debug for ProbeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRegistration")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("failure_status", &self.failure_status)
            .finish_non_exhaustive()
    }
}

pub(crate) fn names_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
