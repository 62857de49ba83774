//! Run conditions for conditional probes.
//!
//! Every condition shape is adapted to one canonical asynchronous form taking
//! the resolver, the evaluation context and the cancellation token. The
//! decorator only ever sees that form.

use std::any::type_name;
use std::fmt;
use std::future::{ready, Future};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tokio_util::sync::CancellationToken;

use crate::conditional::policy::Policy;
use crate::health::{ProbeContext, ProbeError};
use crate::resolver::{FromResolver, Resolver};

type PredicateFn = dyn Fn(Arc<Resolver>, ProbeContext, CancellationToken) -> BoxFuture<'static, Result<bool, ProbeError>>
    + Send
    + Sync;

/// A condition deciding whether a probe runs, evaluated once per invocation.
#[derive(Clone)]
pub struct Predicate {
    inner: Arc<PredicateFn>,
}

impl Predicate {
    /// Canonical form: full access to resolver, context and cancellation.
    pub fn new<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Arc<Resolver>, ProbeContext, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, ProbeError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |resolver, ctx, cancel| predicate(resolver, ctx, cancel).boxed()),
        }
    }

    /// A fixed condition, decided at configuration time.
    pub fn constant(condition: bool) -> Self {
        Self::new(move |_, _, _| ready(Ok(condition)))
    }

    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(move |_, _, _| ready(Ok(predicate())))
    }

    pub fn from_async<F, Fut>(predicate: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::new(move |_, _, _| predicate().map(Ok))
    }

    pub fn with_resolver<F>(predicate: F) -> Self
    where
        F: Fn(&Resolver) -> bool + Send + Sync + 'static,
    {
        Self::new(move |resolver: Arc<Resolver>, _, _| ready(Ok(predicate(&resolver))))
    }

    pub fn with_resolver_async<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Arc<Resolver>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::new(move |resolver, _, _| predicate(resolver).map(Ok))
    }

    pub fn with_context<F>(predicate: F) -> Self
    where
        F: Fn(&Resolver, &ProbeContext) -> bool + Send + Sync + 'static,
    {
        Self::new(move |resolver: Arc<Resolver>, ctx: ProbeContext, _| {
            ready(Ok(predicate(&resolver, &ctx)))
        })
    }

    pub fn with_context_async<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Arc<Resolver>, ProbeContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::new(move |resolver, ctx, _| predicate(resolver, ctx).map(Ok))
    }

    /// Delegate to a pre-built policy instance.
    pub fn policy<P>(policy: P) -> Self
    where
        P: Policy + 'static,
    {
        let policy = Arc::new(policy);
        Self::policy_provider(move |_, _, _| ready(Ok(Some(policy.clone()))))
    }

    /// Delegate to a policy built by `factory` on every evaluation.
    pub fn policy_fn<P, F>(factory: F) -> Self
    where
        P: Policy + 'static,
        F: Fn() -> Option<P> + Send + Sync + 'static,
    {
        Self::policy_provider(move |_, _, _| ready(Ok(factory())))
    }

    /// Delegate to a policy built from the resolver on every evaluation.
    pub fn policy_with_resolver<P, F>(factory: F) -> Self
    where
        P: Policy + 'static,
        F: Fn(&Resolver) -> Option<P> + Send + Sync + 'static,
    {
        Self::policy_provider(move |resolver: Arc<Resolver>, _, _| ready(Ok(factory(&resolver))))
    }

    /// Delegate to a policy constructed through the resolver with `args` as
    /// its explicit constructor arguments.
    pub fn injected_policy<P>(args: P::Args) -> Self
    where
        P: Policy + FromResolver + 'static,
        P::Args: Clone + Send + Sync + 'static,
    {
        Self::policy_with_resolver(move |resolver| resolver.construct::<P>(args.clone()))
    }

    /// Canonical policy form. A provider yielding no policy fails the
    /// evaluation with [`ProbeError::InvalidConfiguration`].
    pub fn policy_provider<P, F, Fut>(provider: F) -> Self
    where
        P: Policy + 'static,
        F: Fn(Arc<Resolver>, ProbeContext, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<P>, ProbeError>> + Send + 'static,
    {
        Self::new(move |resolver, ctx: ProbeContext, cancel| {
            let provided = provider(resolver, ctx.clone(), cancel);
            async move {
                let policy = provided.await?.ok_or_else(|| ProbeError::InvalidConfiguration {
                    probe: ctx.name().to_string(),
                    reason: format!("a policy of type `{}` could not be resolved", type_name::<P>()),
                })?;
                policy.evaluate(&ctx).await
            }
        })
    }

    /// Evaluate the condition.
    pub async fn evaluate(
        &self,
        resolver: Arc<Resolver>,
        ctx: ProbeContext,
        cancel: CancellationToken,
    ) -> Result<bool, ProbeError> {
        (self.inner)(resolver, ctx, cancel).await
    }
}

impl From<bool> for Predicate {
    fn from(condition: bool) -> Self {
        Predicate::constant(condition)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}
