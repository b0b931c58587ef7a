//! Outcome counters.
//!
//! Counts errors, warnings, and informational metrics over finished rows.
//! Rows never share counters while they are being checked; the counts are
//! built in one pass once every row is done.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Per-category counts for a run.
///
/// # Categories
///
/// - **Errors**: Failures that kept a check from completing
/// - **Warnings**: Findings that weaken a live placement
/// - **Info**: Notable events that aren't errors or warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeCounts {
    errors: HashMap<ErrorType, usize>,
    warnings: HashMap<WarningType, usize>,
    info: HashMap<InfoType, usize>,
}

impl OutcomeCounts {
    pub fn new() -> Self {
        OutcomeCounts {
            errors: ErrorType::iter().map(|e| (e, 0)).collect(),
            warnings: WarningType::iter().map(|w| (w, 0)).collect(),
            info: InfoType::iter().map(|i| (i, 0)).collect(),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&mut self, error: ErrorType) {
        *self.errors.entry(error).or_default() += 1;
    }

    /// Increment a warning counter.
    pub fn increment_warning(&mut self, warning: WarningType) {
        *self.warnings.entry(warning).or_default() += 1;
    }

    /// Increment an info counter.
    pub fn increment_info(&mut self, info_type: InfoType) {
        *self.info.entry(info_type).or_default() += 1;
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(&error).copied().unwrap_or(0)
    }

    /// Get the count for a warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(&warning).copied().unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info.get(&info_type).copied().unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.warnings.values().sum()
    }

    pub fn total_info(&self) -> usize {
        self.info.values().sum()
    }
}

impl Default for OutcomeCounts {
    fn default() -> Self {
        Self::new()
    }
}
