//! Page content retrieval.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::fetch::request::RequestHeaders;
use crate::utils::decode_body;

/// A fetched page: response headers and decoded HTML.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Response headers of the GET request
    pub headers: HeaderMap,
    /// Body decoded with the detected charset
    pub html: String,
}

/// Downloads `url` and decodes the body.
///
/// # Errors
///
/// Returns the `reqwest::Error` of a failed request, a non-2xx status, or an
/// interrupted body.
pub async fn fetch_page_content(
    url: &str,
    client: &reqwest::Client,
    timeout: Duration,
) -> Result<PageContent, reqwest::Error> {
    let response = RequestHeaders::apply_to_request_builder(client.get(url))
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;
    let headers = response.headers().clone();
    let bytes = response.bytes().await?;
    Ok(PageContent {
        headers,
        html: decode_body(&bytes),
    })
}
