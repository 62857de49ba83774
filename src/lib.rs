//! Health Check Extensions Library
//!
//! Conditional and retried execution for named health probes. Hosts register
//! probes into a [`ProbeRegistry`] through [`HealthChecksBuilder`], then
//! decorate already registered names:
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use health_extensions::{HealthChecksBuilder, ProbeResult, Resolver};
//!
//! # async fn run() -> Result<(), health_extensions::RegistrationError> {
//! let mut builder = HealthChecksBuilder::new();
//! builder
//!     .add_fn_check("redis", || ProbeResult::healthy("PONG"))
//!     .add_fn_check("rabbitmq", || ProbeResult::unhealthy("connection refused"));
//!
//! builder
//!     .check_only_when("redis", false, None)?
//!     .retry("rabbitmq", 3, Some(Duration::from_millis(200)), None)?;
//!
//! let report = builder
//!     .into_service(Arc::new(Resolver::new()))
//!     .check_health()
//!     .await;
//! # let _ = report;
//! # Ok(())
//! # }
//! ```

// Probe model
pub mod health;
pub mod resolver;

// Decorators
pub mod conditional;
pub mod registration;
pub mod resilience;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use conditional::{ConditionalOptions, ConditionalProbe, Policy, Predicate};
pub use config::ExtensionsConfig;
pub use health::{
    names, FnProbe, HealthCheckService, HealthReport, HealthStatus, Probe, ProbeContext,
    ProbeError, ProbeRegistration, ProbeRegistry, ProbeResult, RegistrationError,
};
pub use lifecycle::Shutdown;
pub use registration::HealthChecksBuilder;
pub use resilience::{RetryOptions, RetryProbe, RetryStrategy, WaitAndRetry};
pub use resolver::{FromResolver, Resolver};
