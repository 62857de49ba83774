//! Pluggable run/skip policies.

use async_trait::async_trait;

use crate::health::{ProbeContext, ProbeError};

/// Decides whether a probe should be evaluated now.
///
/// Implemented by the host, e.g. "is feature flag X set". A policy that
/// cannot decide should return an error rather than guess.
#[async_trait]
pub trait Policy: Send + Sync {
    async fn evaluate(&self, ctx: &ProbeContext) -> Result<bool, ProbeError>;
}

#[async_trait]
impl<P> Policy for std::sync::Arc<P>
where
    P: Policy + ?Sized,
{
    async fn evaluate(&self, ctx: &ProbeContext) -> Result<bool, ProbeError> {
        (**self).evaluate(ctx).await
    }
}
