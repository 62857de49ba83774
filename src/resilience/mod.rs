//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! check(ctx, cancel)
//!     → mark ctx with the retried tag (options.rs)
//!     → wrap inner probe in an execution recorder (probe.rs)
//!     → retries.rs strategy runs the recorded probe
//!         default: attempt, wait (backoff.rs or fixed), attempt, ...
//!     → reject the result if the strategy never ran the probe
//! ```
//!
//! # Design Decisions
//! - Retrying is a probe decorator, so it composes with other decorators
//! - Strategies are pluggable; the default stops on the first Healthy result
//! - Every wait observes the cancellation token

pub mod backoff;
pub mod options;
pub mod probe;
pub mod retries;

pub use options::RetryOptions;
pub use probe::{RetryProbe, RetryProbeBuilder};
pub use retries::{FnRetryStrategy, RetryStrategy, WaitAndRetry};
