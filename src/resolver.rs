//! Dependency resolution for decorated probes.
//!
//! The host owns a [`Resolver`] populated at startup. Probe factories,
//! predicates and policies receive it explicitly; nothing is looked up
//! through global state.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type-keyed service container.
///
/// Populated during configuration and read-only afterwards, so it is shared
/// as `Arc<Resolver>` without locking.
#[derive(Default)]
pub struct Resolver {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, replacing any previous instance of the same type.
    pub fn insert<T>(&mut self, service: T) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.insert_arc(Arc::new(service))
    }

    /// Register an already shared service.
    pub fn insert_arc<T>(&mut self, service: Arc<T>) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.services.insert(TypeId::of::<T>(), service);
        self
    }

    /// Builder-style variant of [`Resolver::insert`].
    pub fn with<T>(mut self, service: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.insert(service);
        self
    }

    /// Retrieve an optional service. Absent services yield `None`.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    pub fn contains<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Construct `T` from its injected dependencies plus explicit arguments.
    pub fn construct<T>(&self, args: T::Args) -> Option<T>
    where
        T: FromResolver,
    {
        T::from_resolver(self, args)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("services", &self.services.len())
            .finish()
    }
}

/// Types constructible through the resolver with extra constructor arguments.
///
/// Returning `None` signals that a dependency was unavailable.
pub trait FromResolver: Sized {
    type Args;

    fn from_resolver(resolver: &Resolver, args: Self::Args) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flags(Vec<&'static str>);

    struct FlagReader {
        flags: Arc<Flags>,
        name: String,
    }

    impl FromResolver for FlagReader {
        type Args = String;

        fn from_resolver(resolver: &Resolver, name: String) -> Option<Self> {
            Some(Self {
                flags: resolver.get::<Flags>()?,
                name,
            })
        }
    }

    #[test]
    fn test_get_returns_registered_service() {
        let resolver = Resolver::new().with(Flags(vec!["beta"]));
        let flags = resolver.get::<Flags>().unwrap();
        assert_eq!(flags.0, vec!["beta"]);
        assert!(resolver.get::<String>().is_none());
    }

    #[test]
    fn test_construct_injects_dependencies() {
        let resolver = Resolver::new().with(Flags(vec!["beta"]));
        let reader = resolver.construct::<FlagReader>("beta".into()).unwrap();
        assert_eq!(reader.name, "beta");
        assert!(reader.flags.0.contains(&"beta"));
    }

    #[test]
    fn test_construct_fails_without_dependency() {
        let resolver = Resolver::new();
        assert!(resolver.construct::<FlagReader>("beta".into()).is_none());
    }
}
