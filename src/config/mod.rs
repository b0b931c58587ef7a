//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, search API defaults)
//! - HTTP header constants
//! - CLI option types, validation and the pipeline options derived from them

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel, PipelineOptions};
