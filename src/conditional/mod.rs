//! Conditional probe execution.
//!
//! # Data Flow
//! ```text
//! check(ctx, cancel)
//!     → remove skip tag from ctx
//!     → predicate.rs (canonical async predicate, evaluated once)
//!         false → add skip tag, synthesize result (options.rs)
//!         true  → inner probe via factory, result returned unchanged
//! ```
//!
//! # Design Decisions
//! - Every predicate shape is adapted to one canonical form
//! - Policies (policy.rs) are resolved at evaluation time; a missing policy
//!   is a configuration error reported for that evaluation
//! - Predicate errors propagate to the host unchanged

pub mod options;
pub mod policy;
pub mod predicate;
pub mod probe;

pub use options::ConditionalOptions;
pub use policy::Policy;
pub use predicate::Predicate;
pub use probe::{ConditionalProbe, ConditionalProbeBuilder, InnerFactory};
