//! Conditional decoration entry points.

use std::sync::Arc;

use crate::conditional::{ConditionalOptions, ConditionalProbe, InnerFactory, Predicate};
use crate::health::{Probe, ProbeFactory, RegistrationError};
use crate::registration::builder::HealthChecksBuilder;
use crate::resolver::Resolver;

/// Wraps a factory so every probe it creates runs only when `predicate` holds.
pub fn conditional_decorator(
    predicate: Predicate,
    options: Option<ConditionalOptions>,
) -> impl Fn(ProbeFactory) -> ProbeFactory {
    move |original: ProbeFactory| -> ProbeFactory {
        let predicate = predicate.clone();
        let options = options.clone();

        Arc::new(move |resolver: &Arc<Resolver>| -> Arc<dyn Probe> {
            let original = original.clone();
            let bound = resolver.clone();
            let inner: InnerFactory = Arc::new(move || original(&bound));

            Arc::new(ConditionalProbe::new(
                inner,
                predicate.clone(),
                resolver.clone(),
                options.clone(),
            ))
        })
    }
}

impl HealthChecksBuilder {
    /// Run the probe registered as `name` only when `predicate` holds.
    ///
    /// Accepts anything convertible into a [`Predicate`], including a plain
    /// `bool`. `options` falls back to the builder defaults.
    pub fn check_only_when(
        &mut self,
        name: &str,
        predicate: impl Into<Predicate>,
        options: Option<ConditionalOptions>,
    ) -> Result<&mut Self, RegistrationError> {
        let options = options.or_else(|| self.conditional_defaults.clone());
        self.registry
            .decorate(name, conditional_decorator(predicate.into(), options))?;
        Ok(self)
    }

    /// Apply the same condition to every probe in `names`.
    ///
    /// Every name is checked before any registration changes.
    pub fn check_all_only_when<S>(
        &mut self,
        names: &[S],
        predicate: impl Into<Predicate>,
        options: Option<ConditionalOptions>,
    ) -> Result<&mut Self, RegistrationError>
    where
        S: AsRef<str>,
    {
        let options = options.or_else(|| self.conditional_defaults.clone());
        self.registry
            .decorate_all(names, conditional_decorator(predicate.into(), options))?;
        Ok(self)
    }
}
