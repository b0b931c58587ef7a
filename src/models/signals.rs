//! Page-level SEO signals and link check results.

/// Tri-state answer for per-slot checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Presence {
    /// The check passed
    Yes,
    /// The check failed
    No,
    /// The slot was not requested for this row
    #[default]
    NotApplicable,
}

impl From<bool> for Presence {
    fn from(value: bool) -> Self {
        if value {
            Presence::Yes
        } else {
            Presence::No
        }
    }
}

/// Outcome for one expected (anchor, URL) slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCheckResult {
    /// Whether a link to the expected URL exists
    pub found: Presence,
    /// Whether such a link carries the expected anchor text
    pub anchor_matches: Presence,
    /// Literal `rel` attribute of the first matching link
    pub rel_attribute: Option<String>,
}

/// Per-slot results of one link scan plus the scan's own error, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCheckReport {
    /// One result per expected slot, in slot order
    pub slots: Vec<LinkCheckResult>,
    /// Set when the page could not be scanned; slots are then left at defaults
    pub error: Option<String>,
}

/// Where the effective crawler directives came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveSource {
    /// `X-Robots-Tag` response header
    XRobotsTag,
    /// `<meta name="googlebot">`
    MetaGooglebot,
    /// `<meta name="robots">`
    MetaRobots,
}

impl DirectiveSource {
    /// Label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveSource::XRobotsTag => "X-Robots-Tag",
            DirectiveSource::MetaGooglebot => "Meta Googlebot",
            DirectiveSource::MetaRobots => "Meta Robots",
        }
    }
}

/// Effective `noindex`/`nofollow` flags for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexingDirectives {
    pub noindex: bool,
    pub nofollow: bool,
    /// `None` when no directive source was present
    pub source: Option<DirectiveSource>,
}

/// Everything extracted from a fetched page.
///
/// Fields left `None` were not reached because an earlier extractor failed;
/// the failure is in `seo_check_error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub robots_allowed_for_star: Option<bool>,
    pub robots_allowed_for_googlebot: Option<bool>,
    pub indexing_directives: Option<IndexingDirectives>,
    pub canonical_url: Option<String>,
    /// One entry per expected slot
    pub link_checks: Vec<LinkCheckResult>,
    pub seo_check_error: Option<String>,
    pub link_check_error: Option<String>,
}

/// Search-index presence of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexStatus {
    Indexed,
    NotIndexed,
    /// The check itself could not be carried out
    CheckFailed,
}

/// Index status plus the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingVerdict {
    pub status: IndexStatus,
    /// Query sent (or meant to be sent) to the search API
    pub search_query: String,
}
