//! Health probing model.
//!
//! # Data Flow
//! ```text
//! Configuration phase:
//!     Host registers named probes → registry.rs
//!     Decoration entry points → registry.rs patches factories
//!
//! Evaluation phase (service.rs):
//!     For each registration
//!     → fresh ProbeContext (context.rs, tag snapshot)
//!     → factory(resolver) → decorated probe
//!     → probe.check(ctx, cancel) → ProbeResult (types.rs)
//!     → report entry with final tags
//! ```
//!
//! # Design Decisions
//! - Registry is mutated only during configuration, read-only afterwards
//! - Decorators implement the same `Probe` trait as concrete probes
//! - Tags are owned per evaluation, never shared between requests

pub mod context;
pub mod error;
pub mod names;
pub mod probe;
pub mod registration;
pub mod registry;
pub mod service;
pub mod types;

pub use context::{ProbeContext, RegistrationInfo, TagSet};
pub use error::{ProbeError, RegistrationError};
pub use probe::{FnProbe, Probe};
pub use registration::{ProbeFactory, ProbeRegistration};
pub use registry::ProbeRegistry;
pub use service::{HealthCheckService, HealthReport, HealthReportEntry};
pub use types::{HealthStatus, ProbeResult};
