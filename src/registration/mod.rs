//! Registration entry points.
//!
//! # Data Flow
//! ```text
//! Host:
//!     builder.rs  add_* → ProbeRegistry
//!     conditional.rs  check_only_when(name, predicate)
//!     retry.rs        retry(name, retries, wait)
//!         → registry.decorate(name, original → decorated factory)
//!
//! Evaluation:
//!     decorated factory(resolver)
//!         → ConditionalProbe / RetryProbe wrapping original factory(resolver)
//! ```
//!
//! # Design Decisions
//! - Decoration happens once, at the call, by swapping the factory
//! - Stacked decorations nest in call order: the last call is the outermost
//! - Every entry point returns the builder so calls chain with `?`

pub mod builder;
pub mod conditional;
pub mod retry;

pub use builder::HealthChecksBuilder;
pub use conditional::conditional_decorator;
pub use retry::{retry_decorator, StrategyFactory};
