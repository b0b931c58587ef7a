//! Input records: one worksheet row to verify.

/// One expected (anchor text, target URL) placement on a page.
///
/// Either part may be absent. A slot without a URL is "not required" and is
/// reported as not applicable rather than missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedLink {
    /// Anchor text the link should carry
    pub anchor: Option<String>,
    /// URL the link should point to
    pub url: Option<String>,
}

impl ExpectedLink {
    /// Builds a slot, treating blank cells as absent.
    pub fn new(anchor: Option<&str>, url: Option<&str>) -> Self {
        Self {
            anchor: non_blank(anchor),
            url: non_blank(url),
        }
    }

    /// Whether this slot has to be looked for on the page.
    pub fn is_required(&self) -> bool {
        self.url.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A page to check plus the links expected on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// Page that should carry the links
    pub target_url: String,
    /// Expected placements, in worksheet slot order
    pub links: Vec<ExpectedLink>,
    /// 1-based worksheet row the request came from, if any
    pub source_row: Option<usize>,
}

impl CheckRequest {
    /// Creates a request that is not tied to a worksheet row.
    pub fn new(target_url: impl Into<String>, links: Vec<ExpectedLink>) -> Self {
        Self {
            target_url: target_url.into(),
            links,
            source_row: None,
        }
    }

    /// Records the worksheet row this request was read from.
    pub fn with_source_row(mut self, row: usize) -> Self {
        self.source_row = Some(row);
        self
    }
}
