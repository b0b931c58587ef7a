//! CSS selector parsing utilities.

use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, logging instead of panicking on failure.
///
/// Extractors keep their selectors in `LazyLock<Option<Selector>>`; a selector
/// that fails to parse simply matches nothing.
pub fn parse_selector(selector_str: &str, context: &str) -> Option<Selector> {
    Selector::parse(selector_str)
        .map_err(|e| {
            log::error!(
                "Failed to parse CSS selector '{}' in {}: {}",
                selector_str,
                context,
                e
            );
        })
        .ok()
}

/// Selects all elements matching an optional selector.
pub fn select_all<'a>(
    document: &'a Html,
    selector: &'a Option<Selector>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    selector
        .iter()
        .flat_map(move |selector| document.select(selector))
}
