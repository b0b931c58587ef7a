//! Main application modules.
//!
//! This module provides run statistics derivation and printing used by the
//! audit entry point.

pub mod statistics;

// Re-export public API
pub use statistics::{print_outcome_counts, print_run_statistics, RunStatistics};
