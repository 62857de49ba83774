//! Core probe trait.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::health::context::ProbeContext;
use crate::health::error::ProbeError;
use crate::health::types::ProbeResult;

/// A unit of health evaluation for one dependency.
///
/// Implemented by concrete probes owned by the host and by the decorators in
/// this crate, which lets decorators wrap each other freely.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Evaluate the dependency.
    ///
    /// Implementations should stop promptly once `cancel` fires. A returned
    /// error is mapped by the host to the registration's failure status.
    async fn check(
        &self,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError>;
}

#[async_trait]
impl<P> Probe for std::sync::Arc<P>
where
    P: Probe + ?Sized,
{
    async fn check(
        &self,
        ctx: &ProbeContext,
        cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        (**self).check(ctx, cancel).await
    }
}

/// Probe backed by a synchronous closure.
pub struct FnProbe<F> {
    check: F,
}

impl<F> FnProbe<F>
where
    F: Fn() -> ProbeResult + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<F> Probe for FnProbe<F>
where
    F: Fn() -> ProbeResult + Send + Sync,
{
    async fn check(
        &self,
        _ctx: &ProbeContext,
        _cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        Ok((self.check)())
    }
}
