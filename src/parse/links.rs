//! On-page link matching.
//!
//! For every expected (anchor, URL) slot the page's `<a href>` elements are
//! scanned. A link matches a slot when its raw or resolved `href` equals the
//! expected URL as typed, with a path added, or percent-encoded the way
//! resolved links are; the anchor text is then compared in normalized form, so
//! accents, case and whitespace differences do not count as mismatches.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::models::{ExpectedLink, LinkCheckReport, LinkCheckResult, Presence};
use crate::utils::{normalize_text, normalize_url, parse_selector, select_all};

static ANCHOR_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| parse_selector("a[href]", "link matching"));

#[derive(Debug)]
struct PageLink {
    href: String,
    resolved: Option<String>,
    text: String,
    rel: Option<String>,
}

impl PageLink {
    fn points_to(&self, targets: &[String]) -> bool {
        targets.iter().any(|target| {
            *target == self.href || self.resolved.as_deref() == Some(target.as_str())
        })
    }
}

// `Url::join` percent-encodes non-ASCII paths, so the expected URL is also
// compared in its serialized form.
fn comparable_forms(expected: &str) -> Vec<String> {
    let mut forms = vec![expected.to_string(), normalize_url(expected)];
    if let Ok(parsed) = Url::parse(expected) {
        forms.push(parsed.to_string());
    }
    forms.dedup();
    forms
}

/// Checks each expected slot against the links on a page.
///
/// Returns one result per slot, in order. Slots without an expected URL are
/// not applicable. If `page_url` cannot serve as a base URL the report
/// carries an error and every slot stays at its not-applicable default.
pub fn check_links_on_page(html: &str, page_url: &str, expected: &[ExpectedLink]) -> LinkCheckReport {
    let document = Html::parse_document(html);
    links_from_document(&document, page_url, expected)
}

/// Same as [`check_links_on_page`] for an already parsed document.
pub fn links_from_document(
    document: &Html,
    page_url: &str,
    expected: &[ExpectedLink],
) -> LinkCheckReport {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(e) => {
            return LinkCheckReport {
                slots: vec![LinkCheckResult::default(); expected.len()],
                error: Some(format!("Cannot resolve links against '{}': {}", page_url, e)),
            };
        }
    };

    let links: Vec<PageLink> = select_all(document, &ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim().to_string();
            let resolved = base.join(&href).ok().map(|url| url.to_string());
            Some(PageLink {
                resolved,
                text: anchor.text().collect(),
                rel: anchor.value().attr("rel").map(str::to_string),
                href,
            })
        })
        .collect();

    LinkCheckReport {
        slots: expected.iter().map(|slot| check_slot(&links, slot)).collect(),
        error: None,
    }
}

fn check_slot(links: &[PageLink], slot: &ExpectedLink) -> LinkCheckResult {
    if !slot.is_required() {
        return LinkCheckResult::default();
    }
    let targets = comparable_forms(slot.url.as_deref().unwrap_or_default());
    let matching: Vec<&PageLink> = links.iter().filter(|link| link.points_to(&targets)).collect();

    let Some(first) = matching.first() else {
        return LinkCheckResult {
            found: Presence::No,
            anchor_matches: Presence::No,
            rel_attribute: None,
        };
    };

    let expected_anchor = slot.anchor.as_deref().map(normalize_text).unwrap_or_default();
    let anchor_matches = matching
        .iter()
        .any(|link| normalize_text(&link.text) == expected_anchor);

    LinkCheckResult {
        found: Presence::Yes,
        anchor_matches: anchor_matches.into(),
        rel_attribute: first.rel.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(anchor: &str, url: &str) -> ExpectedLink {
        ExpectedLink::new(Some(anchor), Some(url))
    }

    #[test]
    fn test_exact_match() {
        let html = r#"<a href="https://example.com/page1">Anchor 1</a>"#;
        let report = check_links_on_page(
            html,
            "https://example.com",
            &[slot("Anchor 1", "https://example.com/page1")],
        );
        assert_eq!(report.error, None);
        assert_eq!(
            report.slots,
            vec![LinkCheckResult {
                found: Presence::Yes,
                anchor_matches: Presence::Yes,
                rel_attribute: None,
            }]
        );
    }

    #[test]
    fn test_url_match_only() {
        let html = r#"<a href="https://example.com/page1">Wrong Anchor</a>"#;
        let report = check_links_on_page(
            html,
            "https://example.com",
            &[slot("Anchor 1", "https://example.com/page1")],
        );
        assert_eq!(report.slots[0].found, Presence::Yes);
        assert_eq!(report.slots[0].anchor_matches, Presence::No);
    }

    #[test]
    fn test_not_found() {
        let html = r#"<a href="https://example.com/other">Other</a>"#;
        let report = check_links_on_page(
            html,
            "https://example.com",
            &[slot("Anchor 1", "https://example.com/page1")],
        );
        assert_eq!(report.slots[0].found, Presence::No);
        assert_eq!(report.slots[0].anchor_matches, Presence::No);
        assert_eq!(report.slots[0].rel_attribute, None);
    }

    #[test]
    fn test_three_slots_with_rel() {
        let html = r#"
            <a href="https://example.com/page1">Anchor 1</a>
            <a href="https://example.com/page2">Anchor 2</a>
            <a href="https://example.com/page3" rel="sponsored">Anchor 3</a>
        "#;
        let report = check_links_on_page(
            html,
            "https://example.com",
            &[
                slot("Anchor 1", "https://example.com/page1"),
                slot("Anchor 2", "https://example.com/page2"),
                slot("Anchor 3", "https://example.com/page3"),
            ],
        );
        assert!(report
            .slots
            .iter()
            .all(|s| s.found == Presence::Yes && s.anchor_matches == Presence::Yes));
        assert_eq!(report.slots[2].rel_attribute.as_deref(), Some("sponsored"));
    }

    #[test]
    fn test_mixed_rel_and_wrong_anchor() {
        let html = r#"
            <html><body>
                <a href="http://example.com/page1" rel="nofollow">Different Anchor</a>
                <a href="http://example.com/page2" rel="sponsored">Anchor 2</a>
            </body></html>
        "#;
        let report = check_links_on_page(
            html,
            "http://example.com/page",
            &[
                slot("Expected Anchor", "http://example.com/page1"),
                slot("Anchor 2", "http://example.com/page2"),
                ExpectedLink::default(),
            ],
        );
        assert_eq!(report.slots[0].found, Presence::Yes);
        assert_eq!(report.slots[0].anchor_matches, Presence::No);
        assert_eq!(report.slots[0].rel_attribute.as_deref(), Some("nofollow"));
        assert_eq!(report.slots[1].anchor_matches, Presence::Yes);
        assert_eq!(report.slots[1].rel_attribute.as_deref(), Some("sponsored"));
        assert_eq!(report.slots[2], LinkCheckResult::default());
    }

    #[test]
    fn test_missing_slot_is_not_applicable_regardless_of_page() {
        let html = r#"<a href="https://example.com/page2">Anchor 2</a>"#;
        let report = check_links_on_page(
            html,
            "https://example.com",
            &[
                slot("Anchor 1", "https://example.com/page1"),
                ExpectedLink::new(Some("Anchor 2"), None),
            ],
        );
        assert_eq!(report.slots[1], LinkCheckResult::default());
    }

    #[test]
    fn test_relative_href_and_accent_insensitive_anchor() {
        let html = r#"<p><a href="/menu">  Café   DEL Mar </a></p>"#;
        let report = check_links_on_page(
            html,
            "https://bistro.example/blog/post",
            &[slot("cafe del mar", "https://bistro.example/menu")],
        );
        assert_eq!(report.slots[0].found, Presence::Yes);
        assert_eq!(report.slots[0].anchor_matches, Presence::Yes);
    }

    #[test]
    fn test_cyrillic_relative_href() {
        let html = r#"<a href="/диван">Купити диван</a>"#;
        let report = check_links_on_page(
            html,
            "https://shop.example.ua/blog/post",
            &[slot("купити диван", "https://shop.example.ua/диван")],
        );
        assert_eq!(report.slots[0].found, Presence::Yes);
        assert_eq!(report.slots[0].anchor_matches, Presence::Yes);
    }

    #[test]
    fn test_encoded_href_matches_raw_expected_url() {
        let html = r#"<a href="https://shop.example.ua/%D0%B4%D0%B8%D0%B2%D0%B0%D0%BD">Диван</a>"#;
        let report = check_links_on_page(
            html,
            "https://blog.example/",
            &[slot("диван", "https://shop.example.ua/диван")],
        );
        assert_eq!(report.slots[0].found, Presence::Yes);
    }

    #[test]
    fn test_any_matching_link_can_carry_the_anchor() {
        let html = r#"
            <a href="https://example.com/p" rel="nofollow">image link</a>
            <a href="https://example.com/p">Buy a sofa</a>
        "#;
        let report = check_links_on_page(
            html,
            "https://blog.example/",
            &[slot("buy a sofa", "https://example.com/p")],
        );
        assert_eq!(report.slots[0].anchor_matches, Presence::Yes);
        assert_eq!(report.slots[0].rel_attribute.as_deref(), Some("nofollow"));
    }

    #[test]
    fn test_bare_origin_expected_url() {
        let html = r#"<a href="https://example.com/">Home</a>"#;
        let report = check_links_on_page(
            html,
            "https://blog.example/",
            &[slot("Home", "https://example.com")],
        );
        assert_eq!(report.slots[0].found, Presence::Yes);
    }

    #[test]
    fn test_unusable_page_url_reports_error() {
        let html = r#"<a href="https://example.com/page1">Anchor 1</a>"#;
        let report = check_links_on_page(
            html,
            "not a url",
            &[slot("Anchor 1", "https://example.com/page1")],
        );
        assert!(report.error.is_some());
        assert_eq!(report.slots, vec![LinkCheckResult::default()]);
    }
}
