//! Health Check Extensions demo host
//!
//! Registers a handful of stand-in probes, decorates them with conditions and
//! retries, and prints each evaluation as JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        HEALTH EXTENSIONS                          │
//!   │                                                                   │
//!   │  config.toml ──▶ ┌─────────┐                                      │
//!   │                  │ config  │──▶ defaults, log level, timeout      │
//!   │                  └─────────┘                                      │
//!   │                                                                   │
//!   │  ┌──────────────┐    ┌──────────────────┐    ┌────────────────┐  │
//!   │  │ registration │───▶│     registry     │───▶│ health service │──┼──▶ JSON report
//!   │  │   builder    │    │ (patched factory)│    │  (per request  │  │
//!   │  └──────────────┘    └──────────────────┘    │    context)    │  │
//!   │         │                                    └───────┬────────┘  │
//!   │         ▼                                            ▼           │
//!   │  ┌──────────────┐    ┌──────────────────┐    ┌────────────────┐  │
//!   │  │ conditional  │    │    resilience    │    │  inner probe   │  │
//!   │  │ predicate /  │───▶│  retry strategy  │───▶│  (host owned)  │  │
//!   │  │   policy     │    │  wait & retry    │    └────────────────┘  │
//!   │  └──────────────┘    └──────────────────┘                        │
//!   │                                                                   │
//!   │  ┌─────────────────────────────────────────────────────────────┐ │
//!   │  │ Cross-Cutting: observability (tracing, metrics) · lifecycle │ │
//!   │  └─────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use health_extensions::config::{load_config, ExtensionsConfig};
use health_extensions::observability::logging;
use health_extensions::{
    names, ConditionalOptions, FromResolver, HealthChecksBuilder, HealthStatus, Policy, Predicate,
    Probe, ProbeContext, ProbeError, ProbeResult, Resolver, Shutdown,
};

#[derive(Parser)]
#[command(name = "health-extensions")]
#[command(about = "Evaluate sample health probes with conditional and retry decorators", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Feature flags to enable (repeatable).
    #[arg(short = 'f', long = "flag")]
    flags: Vec<String>,

    /// Seconds between evaluations; evaluates once when omitted.
    #[arg(short, long)]
    interval: Option<u64>,

    /// Evaluate once even if an interval is given.
    #[arg(long)]
    once: bool,
}

/// Feature flags known to the host.
struct FeatureFlags(BTreeSet<String>);

/// Runs a probe only when its feature flag is enabled.
struct FeatureFlagPolicy {
    flags: Arc<FeatureFlags>,
    flag: &'static str,
}

impl FromResolver for FeatureFlagPolicy {
    type Args = &'static str;

    fn from_resolver(resolver: &Resolver, flag: &'static str) -> Option<Self> {
        Some(Self {
            flags: resolver.get::<FeatureFlags>()?,
            flag,
        })
    }
}

#[async_trait]
impl Policy for FeatureFlagPolicy {
    async fn evaluate(&self, _ctx: &ProbeContext) -> Result<bool, ProbeError> {
        Ok(self.flags.0.contains(self.flag))
    }
}

/// Unhealthy for the first `failures` calls, healthy afterwards.
fn flaky(failures: usize) -> impl Fn() -> ProbeResult + Send + Sync + 'static {
    let calls = AtomicUsize::new(0);
    move || {
        let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= failures {
            ProbeResult::unhealthy(format!("attempt {} failed", call))
        } else {
            ProbeResult::healthy(format!("recovered after {} calls", call))
        }
    }
}

fn build(config: &ExtensionsConfig) -> Result<HealthChecksBuilder, Box<dyn std::error::Error>> {
    let mut builder = HealthChecksBuilder::new();
    builder
        .with_conditional_defaults(config.conditional.clone())
        .with_retry_defaults(config.retry.options())
        .add_fn_check(names::REDIS, || ProbeResult::healthy("PONG"))
        .add_fn_check(names::SQL_SERVER, || ProbeResult::healthy("SELECT 1"))
        .add_fn_check(names::RABBIT_MQ, flaky(2))
        .add_fn_check_with_tags(names::KAFKA, flaky(1), ["messaging"])
        .add_fn_check(names::AZURE_BLOB_STORAGE, || ProbeResult::degraded("throttled"));

    builder
        .check_only_when(
            names::REDIS,
            Predicate::injected_policy::<FeatureFlagPolicy>("redis"),
            None,
        )?
        .check_only_when(
            names::SQL_SERVER,
            false,
            Some(ConditionalOptions::default().with_status_when_skipped(HealthStatus::Degraded)),
        )?
        .retry(names::RABBIT_MQ, config.retry.retries, Some(config.retry.wait()), None)?
        .retry_with_intervals(
            names::KAFKA,
            vec![Duration::from_millis(200), Duration::from_millis(400)],
            None,
        )?
        .retry_with_fn(
            names::AZURE_BLOB_STORAGE,
            |probe: Arc<dyn Probe>, _: Arc<Resolver>, ctx: ProbeContext, cancel: CancellationToken| async move {
                // One extra attempt, no wait.
                let first = probe.check(&ctx, &cancel).await?;
                if first.status == HealthStatus::Healthy {
                    return Ok(first);
                }
                probe.check(&ctx, &cancel).await
            },
            None,
        )?;

    Ok(builder)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExtensionsConfig::default(),
    };

    logging::init(&config.observability)?;
    tracing::info!(
        config = ?cli.config,
        flags = ?cli.flags,
        timeout_ms = config.service.timeout_ms,
        "health-extensions starting"
    );

    let resolver = Arc::new(Resolver::new().with(FeatureFlags(cli.flags.iter().cloned().collect())));
    let service = build(&config)?
        .into_service(resolver)
        .with_timeout(config.service.timeout());

    let shutdown = Shutdown::new();
    let listener = shutdown.listen_for_ctrl_c();

    let interval = cli.interval.filter(|_| !cli.once).map(Duration::from_secs);

    loop {
        let report = service.check_health_with(&shutdown.token()).await;
        println!("{}", serde_json::to_string_pretty(&report)?);

        let Some(interval) = interval else { break };
        tokio::select! {
            _ = shutdown.triggered() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    shutdown.trigger();
    let _ = listener.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
