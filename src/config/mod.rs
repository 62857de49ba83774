//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExtensionsConfig (validated, immutable)
//!     → defaults for registrations, logging and the health service
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ExtensionsConfig, LogFormat, ObservabilityConfig, RetryConfig, ServiceConfig};
pub use validation::ValidationError;
