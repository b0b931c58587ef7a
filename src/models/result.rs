//! Output records: what the pipeline learned about one row.

use crate::error_handling::ErrorType;

use super::request::CheckRequest;
use super::signals::{IndexingVerdict, LinkCheckResult, PageSignals};

/// One response in a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHop {
    /// Normalized URL that returned the redirect
    pub url: String,
    pub status_code: u16,
}

/// Result of the HEAD resolution stage.
///
/// When resolution failed outright, both status codes are 0 and `final_url`
/// is the normalized input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Status of the first HEAD response (before any redirect was followed)
    pub initial_status_code: u16,
    /// Redirect responses in the order they were encountered
    pub redirect_chain: Vec<RedirectHop>,
    /// Normalized URL of the last response
    pub final_url: String,
    pub final_status_code: u16,
    /// Certificate verification was disabled for this row
    pub ssl_fallback_used: bool,
    /// Human-readable failure (or SSL fallback note)
    pub request_error: Option<String>,
    /// Category of a resolution failure, for statistics
    pub error_type: Option<ErrorType>,
}

impl ResolutionOutcome {
    /// An outcome for a row whose URL could not be resolved at all.
    pub fn unresolved(
        normalized_url: impl Into<String>,
        message: impl Into<String>,
        error_type: ErrorType,
        ssl_fallback_used: bool,
    ) -> Self {
        Self {
            initial_status_code: 0,
            redirect_chain: Vec::new(),
            final_url: normalized_url.into(),
            final_status_code: 0,
            ssl_fallback_used,
            request_error: Some(message.into()),
            error_type: Some(error_type),
        }
    }

    /// Whether the final response was `200 OK`, the only status that leads
    /// to content checks.
    pub fn is_ok(&self) -> bool {
        self.final_status_code == 200
    }
}

/// Final per-row record: the request carried through plus every stage's
/// result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub request: CheckRequest,
    pub resolution: ResolutionOutcome,
    /// Failure of the page GET (transport, status or decoding)
    pub content_error: Option<String>,
    /// Present only when the page was fetched
    pub signals: Option<PageSignals>,
    /// Present only when an API key was configured and the page was fetched
    pub indexing: Option<IndexingVerdict>,
}

impl CheckResult {
    /// SEO-check error: the content fetch failure, or the extraction failure.
    pub fn seo_check_error(&self) -> Option<&str> {
        self.content_error.as_deref().or_else(|| {
            self.signals
                .as_ref()
                .and_then(|s| s.seo_check_error.as_deref())
        })
    }

    /// Link-check error: the content fetch failure, or the link scan failure.
    pub fn link_check_error(&self) -> Option<&str> {
        self.content_error.as_deref().or_else(|| {
            self.signals
                .as_ref()
                .and_then(|s| s.link_check_error.as_deref())
        })
    }

    /// Whether the page was reached but some content check failed.
    pub fn has_content_errors(&self) -> bool {
        self.seo_check_error().is_some() || self.link_check_error().is_some()
    }

    /// Per-slot link results, with not-applicable entries for pages that
    /// were never scanned.
    pub fn link_checks(&self) -> Vec<LinkCheckResult> {
        let mut checks = self
            .signals
            .as_ref()
            .map(|s| s.link_checks.clone())
            .unwrap_or_default();
        checks.resize(self.request.links.len(), LinkCheckResult::default());
        checks
    }
}
