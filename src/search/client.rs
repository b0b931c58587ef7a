//! Search-index API client.

use std::time::Duration;

use log::{debug, error, info};
use serde::Deserialize;

use crate::config::{SEARCH_COUNTRY, SEARCH_GOOGLE_DOMAIN, SEARCH_LANGUAGE, SEARCH_RESULT_COUNT};
use crate::error_handling::{describe_reqwest_error, SearchError};

use super::query::build_search_query;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(default)]
    original_query_yields_zero_results: Option<bool>,
    #[serde(default)]
    total_results: Option<u64>,
}

/// Client for the ValueSerp search API.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl SearchClient {
    /// Creates a client that sends requests through `client` to `endpoint`.
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Checks whether `url` appears in the search index.
    ///
    /// Returns whether the URL is indexed along with the query that was sent.
    /// Transport failures, error statuses and unexpected response bodies all
    /// count as "not indexed".
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Request` only when the request cannot be built
    /// (for example, an unusable endpoint URL).
    pub async fn check_indexing(&self, url: &str) -> Result<(bool, String), SearchError> {
        let query = build_search_query(url);
        info!("Checking index presence for {}", url);
        info!("Search query: {}", query);

        let num = SEARCH_RESULT_COUNT.to_string();
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("google_domain", SEARCH_GOOGLE_DOMAIN),
                ("gl", SEARCH_COUNTRY),
                ("hl", SEARCH_LANGUAGE),
                ("num", num.as_str()),
            ])
            .timeout(self.timeout)
            .build()
            .map_err(SearchError::Request)?;

        let indexed = match self.fetch_response(request).await {
            Ok(response) => is_indexed(url, &response),
            Err(e) => {
                error!(
                    "Index check failed for {}: {}",
                    url,
                    describe_reqwest_error(&e)
                );
                false
            }
        };
        Ok((indexed, query))
    }

    async fn fetch_response(
        &self,
        request: reqwest::Request,
    ) -> Result<SearchResponse, reqwest::Error> {
        self.client
            .execute(request)
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await
    }
}

fn is_indexed(url: &str, response: &SearchResponse) -> bool {
    if response
        .organic_results
        .as_ref()
        .is_some_and(|results| !results.is_empty())
    {
        info!("{} found in the search index", url);
        return true;
    }

    match &response.search_information {
        Some(info) if info.original_query_yields_zero_results == Some(true) => {
            info!("{} not found in the search index", url);
        }
        Some(info) if info.total_results == Some(0) => {
            info!("{} not found in the search index (zero results)", url);
        }
        _ => {
            debug!("No organic results in search response for {}", url);
            info!("{} not found in the search index", url);
        }
    }
    false
}
