//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use health_extensions::{
    FromResolver, HealthStatus, Policy, Probe, ProbeContext, ProbeError, ProbeResult,
};

/// Probe returning a scripted sequence of statuses, repeating the last one,
/// and counting its invocations.
pub struct SequenceProbe {
    statuses: Vec<HealthStatus>,
    calls: AtomicUsize,
}

impl SequenceProbe {
    pub fn new(statuses: Vec<HealthStatus>) -> Arc<Self> {
        Arc::new(Self {
            statuses,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn always(status: HealthStatus) -> Arc<Self> {
        Self::new(vec![status])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for SequenceProbe {
    async fn check(
        &self,
        _ctx: &ProbeContext,
        _cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let status = self.statuses[call.min(self.statuses.len() - 1)];
        Ok(ProbeResult::new(status, format!("call {}", call + 1)).with_data("call", call + 1))
    }
}

/// Probe failing with an error on every call.
pub struct FailingProbe {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Probe for FailingProbe {
    async fn check(
        &self,
        _ctx: &ProbeContext,
        _cancel: &CancellationToken,
    ) -> Result<ProbeResult, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProbeError::Failed("connection refused".to_string()))
    }
}

/// Feature flags registered in the resolver.
pub struct FeatureFlags(pub Mutex<BTreeSet<String>>);

impl FeatureFlags {
    pub fn with(flags: &[&str]) -> Self {
        Self(Mutex::new(flags.iter().map(|f| f.to_string()).collect()))
    }

    pub fn set(&self, flag: &str, enabled: bool) {
        let mut flags = self.0.lock().unwrap();
        if enabled {
            flags.insert(flag.to_string());
        } else {
            flags.remove(flag);
        }
    }
}

/// Policy enabled by a named feature flag, built through the resolver.
pub struct FeatureFlagPolicy {
    flags: Arc<FeatureFlags>,
    flag: String,
}

impl FromResolver for FeatureFlagPolicy {
    type Args = String;

    fn from_resolver(resolver: &health_extensions::Resolver, flag: String) -> Option<Self> {
        Some(Self {
            flags: resolver.get::<FeatureFlags>()?,
            flag,
        })
    }
}

#[async_trait]
impl Policy for FeatureFlagPolicy {
    async fn evaluate(&self, _ctx: &ProbeContext) -> Result<bool, ProbeError> {
        Ok(self.flags.0.lock().unwrap().contains(&self.flag))
    }
}
