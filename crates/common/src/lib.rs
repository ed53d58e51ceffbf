//! FocusLens Common Utilities
//!
//! Shared infrastructure for all FocusLens crates:
//! - Error types and result aliases
//! - Clocks for session timing (monotonic and manual)
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
