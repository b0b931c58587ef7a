//! Browser-like request headers.

use reqwest::header::{
    HeaderName, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, REFERER, UPGRADE_INSECURE_REQUESTS,
};

use crate::config::{BROWSER_ACCEPT, BROWSER_ACCEPT_LANGUAGE, BROWSER_REFERER};

/// Headers of a desktop Chrome navigation request.
///
/// Sites that sniff for bots may answer a bare client with a different page,
/// a 403, or a challenge. Every HEAD, GET and robots.txt request carries
/// these so the audit sees what a visitor sees.
///
/// `Accept-Encoding` is left to the HTTP client, which only advertises what
/// it can decode.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
            .header(REFERER, BROWSER_REFERER)
            .header(HeaderName::from_static("sec-fetch-dest"), "document")
            .header(HeaderName::from_static("sec-fetch-mode"), "navigate")
            .header(HeaderName::from_static("sec-fetch-site"), "none")
            .header(HeaderName::from_static("sec-fetch-user"), "?1")
            .header(UPGRADE_INSECURE_REQUESTS, "1")
            .header(CACHE_CONTROL, "max-age=0")
    }
}
