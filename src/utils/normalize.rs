//! Text and URL normalization.
//!
//! Anchor texts and URLs copied into worksheets by hand rarely match the page
//! byte for byte. These helpers produce the comparable forms used by the link
//! matcher and the worksheet adapter.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use url::Url;

static SHEET_ID_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"/d/([A-Za-z0-9_-]+)")
        .map_err(|e| log::error!("Failed to compile sheet id pattern: {}", e))
        .ok()
});

/// Ensures a URL has a path component.
///
/// `https://example.com` becomes `https://example.com/` and
/// `https://example.com?x=1` becomes `https://example.com/?x=1`. Query string
/// and fragment are kept verbatim (no percent-encoding), as are scheme and host
/// casing. Anything that does not parse as a hierarchical URL is returned
/// unchanged.
pub fn normalize_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() && parsed.has_host() => {}
        _ => return url.to_string(),
    }

    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let authority_end = url[authority_start..]
        .find(['/', '\\', '?', '#'])
        .map_or(url.len(), |offset| authority_start + offset);

    // A backslash separates the path for special schemes
    if url[authority_end..].starts_with(['/', '\\']) {
        return url.to_string();
    }

    let mut normalized = String::with_capacity(url.len() + 1);
    normalized.push_str(&url[..authority_end]);
    normalized.push('/');
    normalized.push_str(&url[authority_end..]);
    normalized
}

/// Produces the comparable form of a piece of text.
///
/// Lower-cases, strips combining diacritical marks (after canonical
/// decomposition), collapses whitespace runs to a single space and trims.
/// Any displayable value is accepted; numbers are compared by their
/// textual form.
pub fn normalize_text(text: impl Display) -> String {
    let lowered = text.to_string().to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the spreadsheet id and tab (`gid`) from a Google Sheets URL.
///
/// The tab is read from the fragment first, then the query string, and
/// defaults to 0 when absent or not numeric. Returns `None` when the URL has
/// no `/d/<id>` segment.
pub fn extract_sheet_id_and_tab(url: &str) -> Option<(String, u64)> {
    let pattern = SHEET_ID_PATTERN.as_ref()?;
    let sheet_id = pattern.captures(url)?.get(1)?.as_str().to_string();

    let tab = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            let from_fragment = parsed
                .fragment()
                .and_then(|fragment| gid_from_pairs(fragment.as_bytes()));
            from_fragment.or_else(|| parsed.query().and_then(|q| gid_from_pairs(q.as_bytes())))
        })
        .and_then(|gid| gid.parse::<u64>().ok())
        .unwrap_or(0);

    Some((sheet_id, tab))
}

fn gid_from_pairs(input: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(input)
        .find(|(key, _)| key == "gid")
        .map(|(_, value)| value.into_owned())
}
