//! Stacking conditional and retry decorations on one probe.

use std::sync::Arc;
use std::time::Duration;

use health_extensions::{HealthChecksBuilder, HealthStatus, Predicate, Resolver};

mod common;
use common::SequenceProbe;

#[tokio::test(start_paused = true)]
async fn test_condition_then_retry_skips_without_retrying() {
    let probe = SequenceProbe::always(HealthStatus::Unhealthy);
    let mut builder = HealthChecksBuilder::new();
    builder.add_probe("kafka", probe.clone());
    builder
        .check_only_when("kafka", false, None)
        .unwrap()
        .retry("kafka", 3, Some(Duration::from_secs(1)), None)
        .unwrap();

    let report = builder.into_service(Arc::new(Resolver::new())).check_health().await;

    let entry = report.entry("kafka").unwrap();
    assert_eq!(probe.calls(), 0);
    assert_eq!(entry.status, HealthStatus::Healthy);
    assert_eq!(entry.tags, vec!["NotChecked".to_string(), "Retried".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_retry_then_condition_skips_before_retry() {
    let probe = SequenceProbe::always(HealthStatus::Unhealthy);
    let mut builder = HealthChecksBuilder::new();
    builder.add_probe("kafka", probe.clone());
    builder
        .retry("kafka", 3, Some(Duration::from_secs(1)), None)
        .unwrap()
        .check_only_when("kafka", false, None)
        .unwrap();

    let report = builder.into_service(Arc::new(Resolver::new())).check_health().await;

    let entry = report.entry("kafka").unwrap();
    assert_eq!(probe.calls(), 0);
    assert_eq!(entry.status, HealthStatus::Healthy);
    assert_eq!(entry.tags, vec!["NotChecked".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_enabled_condition_with_retry_runs_both() {
    let probe = SequenceProbe::new(vec![
        HealthStatus::Unhealthy,
        HealthStatus::Unhealthy,
        HealthStatus::Healthy,
    ]);
    let mut builder = HealthChecksBuilder::new();
    builder.add_probe("kafka", probe.clone());
    builder
        .retry("kafka", 3, None, None)
        .unwrap()
        .check_only_when("kafka", Predicate::constant(true), None)
        .unwrap();

    let report = builder.into_service(Arc::new(Resolver::new())).check_health().await;

    let entry = report.entry("kafka").unwrap();
    assert_eq!(probe.calls(), 3);
    assert_eq!(entry.status, HealthStatus::Healthy);
    assert_eq!(entry.tags, vec!["Retried".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_retry_re_evaluates_inner_condition_per_attempt() {
    let probe = SequenceProbe::always(HealthStatus::Unhealthy);
    let evaluations = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = evaluations.clone();

    let mut builder = HealthChecksBuilder::new();
    builder.add_probe("kafka", probe.clone());
    builder
        .check_only_when(
            "kafka",
            Predicate::from_fn(move || {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                true
            }),
            None,
        )
        .unwrap()
        .retry("kafka", 2, None, None)
        .unwrap();

    builder.into_service(Arc::new(Resolver::new())).check_health().await;

    assert_eq!(probe.calls(), 3);
    assert_eq!(evaluations.load(std::sync::atomic::Ordering::SeqCst), 3);
}
