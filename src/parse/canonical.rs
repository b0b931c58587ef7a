//! Canonical link extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::utils::{normalize_url, parse_selector, select_all};

static LINK_REL_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| parse_selector("link[rel][href]", "canonical extraction"));

/// Returns the page's canonical URL, resolved against `page_url`.
///
/// The first `<link rel="canonical">` with a non-empty `href` counts. The
/// result is normalized (a bare origin gains a `/` path).
pub fn check_canonical_tag(page_url: &str, html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    canonical_from_document(page_url, &document)
}

/// Same as [`check_canonical_tag`] for an already parsed document.
pub fn canonical_from_document(page_url: &str, document: &Html) -> Option<String> {
    let href = select_all(document, &LINK_REL_SELECTOR)
        .filter(|link| {
            link.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .filter_map(|link| link.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())?;

    let resolved = match Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    };
    Some(normalize_url(&resolved))
}
