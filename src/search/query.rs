//! Search query construction for index checks.

use url::form_urlencoded;

/// Strips the scheme and one leading `www.` label.
fn strip_scheme_and_www(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.strip_prefix("www.").unwrap_or(without_scheme)
}

/// Builds the search query used to test whether a URL is indexed.
///
/// Without a query string this is `site:{host+path}`. With one, the base
/// gains a trailing slash and every `key=value` pair becomes an `inurl:`
/// term; a query string without such pairs becomes a single `inurl:` term.
///
/// ```
/// use link_audit::search::build_search_query;
///
/// assert_eq!(build_search_query("https://www.example.com/"), "site:example.com/");
/// assert_eq!(
///     build_search_query("https://example.com/path?param1=value1&param2=value2"),
///     "site:example.com/path/ inurl:param1=value1 inurl:param2=value2"
/// );
/// ```
pub fn build_search_query(url: &str) -> String {
    let cleaned = strip_scheme_and_www(url);

    let without_fragment = cleaned.split_once('#').map_or(cleaned, |(head, _)| head);
    let Some((base, query)) = without_fragment.split_once('?') else {
        return format!("site:{}", cleaned);
    };
    if query.is_empty() {
        return format!("site:{}", cleaned);
    }

    let mut base = base.to_string();
    if !base.is_empty() && !base.ends_with('/') {
        base.push('/');
    } else if base.ends_with("//") {
        base.pop();
    }

    let terms: Vec<String> = form_urlencoded::parse(query.as_bytes())
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("inurl:{}={}", key, value))
        .collect();

    if terms.is_empty() {
        format!("site:{} inurl:{}", base, query)
    } else {
        format!("site:{} {}", base, terms.join(" "))
    }
}
