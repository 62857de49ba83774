//! Probe registry and registration patching.
//!
//! # Responsibilities
//! - Hold registrations in insertion order
//! - Locate a registration by case-insensitive name
//! - Replace a registration's factory with a decorated one
//!
//! # Design Decisions
//! - Decoration is a second pass over an already populated registry;
//!   a missing name is a configuration error listing the known names
//! - Multi-name decoration validates every name before touching any
//!   registration, so a failure never leaves the registry half decorated
//! - The registry is mutated during configuration only and read-only while
//!   serving, so no locking is involved

use tracing::debug;

use crate::health::error::RegistrationError;
use crate::health::registration::{ProbeFactory, ProbeRegistration};

/// Ordered collection of named probe registrations.
///
/// Names are not required to be unique; lookups resolve to the first match.
#[derive(Debug, Clone, Default)]
pub struct ProbeRegistry {
    registrations: Vec<ProbeRegistration>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: ProbeRegistration) {
        debug!(probe = %registration.name(), "Probe registered");
        self.registrations.push(registration);
    }

    /// First registration whose name matches `name` case-insensitively.
    pub fn get(&self, name: &str) -> Option<&ProbeRegistration> {
        self.registrations.iter().find(|r| r.matches(name))
    }

    fn position(&self, name: &str) -> Result<usize, RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        self.registrations
            .iter()
            .position(|r| r.matches(name))
            .ok_or_else(|| RegistrationError::NotFound {
                name: name.to_string(),
                known: self.names().into_iter().map(str::to_string).collect(),
            })
    }

    /// Replace the factory of the registration named `name` with
    /// `decorate(original_factory)`.
    pub fn decorate<D>(&mut self, name: &str, decorate: D) -> Result<(), RegistrationError>
    where
        D: FnOnce(ProbeFactory) -> ProbeFactory,
    {
        let index = self.position(name)?;
        let registration = &mut self.registrations[index];
        let decorated = decorate(registration.factory().clone());
        registration.set_factory(decorated);

        debug!(probe = %registration.name(), "Probe decorated");
        Ok(())
    }

    /// Apply `decorate` to every registration named in `names`, in order.
    pub fn decorate_all<S, D>(&mut self, names: &[S], decorate: D) -> Result<(), RegistrationError>
    where
        S: AsRef<str>,
        D: Fn(ProbeFactory) -> ProbeFactory,
    {
        if names.is_empty() {
            return Err(RegistrationError::EmptyNames);
        }

        let indices = names
            .iter()
            .map(|name| self.position(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for index in indices {
            let registration = &mut self.registrations[index];
            let decorated = decorate(registration.factory().clone());
            registration.set_factory(decorated);
            debug!(probe = %registration.name(), "Probe decorated");
        }

        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeRegistration> {
        self.registrations.iter()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl FromIterator<ProbeRegistration> for ProbeRegistry {
    fn from_iter<I: IntoIterator<Item = ProbeRegistration>>(iter: I) -> Self {
        Self {
            registrations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{Probe, ProbeContext, ProbeResult};
    use crate::resolver::Resolver;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn registry() -> ProbeRegistry {
        ["redis", "rabbitmq", "redis"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                ProbeRegistration::from_fn(name, move || ProbeResult::healthy(format!("#{}", i)))
            })
            .collect()
    }

    async fn describe(registry: &ProbeRegistry, index: usize) -> String {
        let registration = registry.iter().nth(index).unwrap();
        let probe = registration.create_probe(&Arc::new(Resolver::new()));
        probe
            .check(&ProbeContext::new(registration), &CancellationToken::new())
            .await
            .unwrap()
            .description
    }

    fn fixed_factory(description: &'static str) -> ProbeFactory {
        let probe: Arc<dyn Probe> =
            Arc::new(crate::health::FnProbe::new(move || ProbeResult::healthy(description)));
        Arc::new(move |_: &Arc<Resolver>| probe.clone())
    }

    #[tokio::test]
    async fn test_decorate_patches_first_match_only() {
        let mut registry = registry();
        registry.decorate("REDIS", |_| fixed_factory("patched")).unwrap();

        assert_eq!(describe(&registry, 0).await, "patched");
        assert_eq!(describe(&registry, 1).await, "#1");
        assert_eq!(describe(&registry, 2).await, "#2");
    }

    #[tokio::test]
    async fn test_decorate_receives_original_factory() {
        let mut registry = registry();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        registry
            .decorate("rabbitmq", move |original: ProbeFactory| -> ProbeFactory {
                Arc::new(move |resolver: &Arc<Resolver>| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    original(resolver)
                })
            })
            .unwrap();

        assert_eq!(describe(&registry, 1).await, "#1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_decorate_unknown_name_lists_known_names() {
        let mut registry = registry();
        let err = registry.decorate("X", |_| fixed_factory("never")).unwrap_err();

        match &err {
            RegistrationError::NotFound { name, known } => {
                assert_eq!(name, "X");
                assert_eq!(known, &vec!["redis", "rabbitmq", "redis"]);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(err.to_string().contains("`X`"));
        assert!(err.to_string().contains("`rabbitmq`"));
    }

    #[test]
    fn test_decorate_empty_name_fails_before_lookup() {
        let mut registry = ProbeRegistry::new();
        let err = registry.decorate("", |_| fixed_factory("never")).unwrap_err();
        assert_eq!(err, RegistrationError::EmptyName);
    }

    #[test]
    fn test_decorate_all_rejects_empty_list() {
        let mut registry = registry();
        let names: [&str; 0] = [];
        let err = registry.decorate_all(&names, |_| fixed_factory("never")).unwrap_err();
        assert_eq!(err, RegistrationError::EmptyNames);
    }

    #[tokio::test]
    async fn test_decorate_all_is_all_or_nothing() {
        let mut registry = registry();
        let err = registry
            .decorate_all(&["rabbitmq", "missing"], |_| fixed_factory("patched"))
            .unwrap_err();

        assert!(matches!(err, RegistrationError::NotFound { .. }));
        assert_eq!(describe(&registry, 1).await, "#1");
    }

    #[tokio::test]
    async fn test_decorate_all_patches_each_name() {
        let mut registry = registry();
        registry
            .decorate_all(&["redis", "RabbitMQ"], |_| fixed_factory("patched"))
            .unwrap();

        assert_eq!(describe(&registry, 0).await, "patched");
        assert_eq!(describe(&registry, 1).await, "patched");
        assert_eq!(describe(&registry, 2).await, "#2");
    }
}
