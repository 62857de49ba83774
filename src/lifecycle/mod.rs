//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl-C or host request → cancel root token
//!     → child tokens held by in-flight evaluations are cancelled
//!     → retry waits and hanging probes return `ProbeError::Cancelled`
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
