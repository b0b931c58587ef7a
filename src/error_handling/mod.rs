//! Error handling.
//!
//! This module provides:
//! - Error type definitions (initialization, resolution, search, worksheet)
//! - Categorization of request failures
//! - Error message extraction from `reqwest` error chains
//! - Outcome counting for run statistics
//!
//! Row outcomes are categorized into:
//! - **Errors**: Failures that prevent a check from completing
//! - **Warnings**: Findings on a live page that weaken the placement
//! - **Info**: Informational metrics (redirects, SSL fallback)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_resolve_error, describe_reqwest_error, error_cause_text,
    is_tls_failure,
};
pub use stats::OutcomeCounts;
pub use types::{
    ErrorType, InfoType, InitializationError, ResolveError, SearchError, SheetStructureError,
    WarningType, WorksheetError,
};
