//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probe decorators and the health service produce:
//!     → tracing events (skips, retry attempts, evaluation failures)
//!     → metrics.rs (counters keyed by probe name)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → whatever `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder on its own
//! - Structured fields (`probe = %name`) on every event
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;
