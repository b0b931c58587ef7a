//! Processing context for row checks.
//!
//! This module defines the `ProcessingContext` struct that groups all shared
//! resources needed for checking rows, reducing function argument counts.

use crate::config::PipelineOptions;
use crate::initialization::HttpClients;
use crate::search::SearchClient;

/// Context containing all shared resources needed for row checks.
///
/// Nothing in here is mutated while rows are checked; per-row state such as
/// the TLS mode lives in the row's own pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    /// Verified and unverified HTTP clients
    pub clients: HttpClients,
    /// User agent and timeouts
    pub options: PipelineOptions,
    /// Index checker; `None` when no API key was configured
    pub search: Option<SearchClient>,
}

impl ProcessingContext {
    /// Creates a new `ProcessingContext` with the given resources.
    pub fn new(
        clients: HttpClients,
        options: PipelineOptions,
        search: Option<SearchClient>,
    ) -> Self {
        Self {
            clients,
            options,
            search,
        }
    }
}
