//! Crawler directives from the `X-Robots-Tag` header and robots meta tags.

use std::sync::LazyLock;

use reqwest::header::HeaderMap;
use scraper::{Html, Selector};

use crate::config::HEADER_X_ROBOTS_TAG;
use crate::models::{DirectiveSource, IndexingDirectives};
use crate::utils::{parse_selector, select_all};

static META_NAMED_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| parse_selector("meta[name][content]", "robots meta extraction"));

/// Determines the effective `noindex`/`nofollow` flags of a page.
///
/// The first source present wins: the `X-Robots-Tag` header, then
/// `<meta name="googlebot">`, then `<meta name="robots">`. Without any
/// source both flags are false and the source is `None`.
pub fn check_indexing_directives(headers: &HeaderMap, html: &str) -> IndexingDirectives {
    let document = Html::parse_document(html);
    indexing_directives_from_document(headers, &document)
}

/// Same as [`check_indexing_directives`] for an already parsed document.
pub fn indexing_directives_from_document(
    headers: &HeaderMap,
    document: &Html,
) -> IndexingDirectives {
    if let Some(content) = x_robots_tag(headers) {
        return directives_from(&content, DirectiveSource::XRobotsTag);
    }
    if let Some(content) = meta_content(document, "googlebot") {
        return directives_from(&content, DirectiveSource::MetaGooglebot);
    }
    if let Some(content) = meta_content(document, "robots") {
        return directives_from(&content, DirectiveSource::MetaRobots);
    }
    IndexingDirectives::default()
}

// Several X-Robots-Tag headers are equivalent to one comma-joined header.
// Values that are not visible ASCII or are blank are skipped.
fn x_robots_tag(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(HEADER_X_ROBOTS_TAG)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    (!values.is_empty()).then(|| values.join(","))
}

fn meta_content(document: &Html, name: &str) -> Option<String> {
    select_all(document, &META_NAMED_SELECTOR)
        .find(|meta| {
            meta.value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
        })
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

fn directives_from(content: &str, source: DirectiveSource) -> IndexingDirectives {
    let mut directives = IndexingDirectives {
        noindex: false,
        nofollow: false,
        source: Some(source),
    };
    for token in content.split(',') {
        // "googlebot: noindex" scopes a header directive to one crawler
        let token = token.rsplit(':').next().unwrap_or(token).trim();
        if token.eq_ignore_ascii_case("noindex") {
            directives.noindex = true;
        } else if token.eq_ignore_ascii_case("nofollow") {
            directives.nofollow = true;
        }
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_x_robots_tag() {
        let result = check_indexing_directives(
            &headers(&[("x-robots-tag", "noindex, nofollow")]),
            "<html></html>",
        );
        assert_eq!(
            result,
            IndexingDirectives {
                noindex: true,
                nofollow: true,
                source: Some(DirectiveSource::XRobotsTag)
            }
        );
    }

    #[test]
    fn test_header_wins_over_meta() {
        let html = r#"<html><head><meta name="robots" content="noindex"></head></html>"#;
        let result = check_indexing_directives(&headers(&[("x-robots-tag", "index, follow")]), html);
        assert!(!result.noindex);
        assert!(!result.nofollow);
        assert_eq!(result.source, Some(DirectiveSource::XRobotsTag));
    }

    #[test]
    fn test_blank_header_falls_through_to_meta() {
        let html = r#"<html><head><meta name="robots" content="noindex"></head></html>"#;
        let result = check_indexing_directives(&headers(&[("x-robots-tag", "")]), html);
        assert_eq!(
            result,
            IndexingDirectives {
                noindex: true,
                nofollow: false,
                source: Some(DirectiveSource::MetaRobots)
            }
        );
    }

    #[test]
    fn test_mixed_case_header_and_value() {
        let result = check_indexing_directives(&headers(&[("x-robots-tag", "NOINDEX")]), "");
        assert!(result.noindex);
        assert_eq!(result.source, Some(DirectiveSource::XRobotsTag));
    }

    #[test]
    fn test_agent_scoped_header_and_multiple_values() {
        let result = check_indexing_directives(
            &headers(&[
                ("x-robots-tag", "googlebot: noindex"),
                ("x-robots-tag", "nofollow"),
            ]),
            "",
        );
        assert!(result.noindex);
        assert!(result.nofollow);
    }

    #[test]
    fn test_meta_googlebot_wins_over_robots() {
        let html = r#"<html><head>
            <meta name="robots" content="nofollow">
            <meta name="googlebot" content="noindex, nofollow">
        </head></html>"#;
        let result = check_indexing_directives(&HeaderMap::new(), html);
        assert_eq!(
            result,
            IndexingDirectives {
                noindex: true,
                nofollow: true,
                source: Some(DirectiveSource::MetaGooglebot)
            }
        );
    }

    #[test]
    fn test_meta_robots_noindex() {
        let html = r#"<html><head><meta name="robots" content="noindex"></head></html>"#;
        let result = check_indexing_directives(&HeaderMap::new(), html);
        assert_eq!(
            result,
            IndexingDirectives {
                noindex: true,
                nofollow: false,
                source: Some(DirectiveSource::MetaRobots)
            }
        );
    }

    #[test]
    fn test_meta_name_is_case_insensitive() {
        let html = r#"<meta name="ROBOTS" content="NoIndex">"#;
        let result = check_indexing_directives(&HeaderMap::new(), html);
        assert!(result.noindex);
        assert_eq!(result.source, Some(DirectiveSource::MetaRobots));
    }

    #[test]
    fn test_no_directives() {
        let html = "<html><head></head><body></body></html>";
        assert_eq!(
            check_indexing_directives(&HeaderMap::new(), html),
            IndexingDirectives::default()
        );
    }

    #[test]
    fn test_invalid_html() {
        let html = r#"<html><head><meta name="robots" content="nofollow"></body>"#;
        let result = check_indexing_directives(&HeaderMap::new(), html);
        assert_eq!(
            result,
            IndexingDirectives {
                noindex: false,
                nofollow: true,
                source: Some(DirectiveSource::MetaRobots)
            }
        );
    }
}
