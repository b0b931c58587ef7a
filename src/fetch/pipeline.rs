//! Row pipeline: resolution, content, signals, index check.
//!
//! Each stage returns its own value and `check_row` assembles the final
//! `CheckResult` once every stage that applies has run.

use futures::stream::{self, StreamExt};
use log::{info, warn};

use crate::error_handling::describe_reqwest_error;
use crate::fetch::content::fetch_page_content;
use crate::fetch::context::ProcessingContext;
use crate::fetch::resolution::resolve_target;
use crate::fetch::signals::extract_page_signals;
use crate::initialization::TlsMode;
use crate::models::{CheckRequest, CheckResult, IndexStatus, IndexingVerdict};
use crate::search::{build_search_query, SearchClient};

/// Checks a single worksheet row.
///
/// Never fails: every problem is recorded in the returned result.
pub async fn check_row(request: CheckRequest, ctx: &ProcessingContext) -> CheckResult {
    let resolution = resolve_target(&request.target_url, &ctx.clients, &ctx.options).await;

    let mut result = CheckResult {
        request,
        resolution,
        content_error: None,
        signals: None,
        indexing: None,
    };
    if !result.resolution.is_ok() {
        return result;
    }

    let mode = if result.resolution.ssl_fallback_used {
        TlsMode::Unverified
    } else {
        TlsMode::Verified
    };
    let suffix = if mode.is_disabled() {
        " (SSL disabled)"
    } else {
        ""
    };
    let client = &ctx.clients.for_mode(mode).content;
    let final_url = result.resolution.final_url.clone();
    info!("   Running SEO and link checks for {}{}", final_url, suffix);

    let page = match fetch_page_content(&final_url, client, ctx.options.get_timeout).await {
        Ok(page) => page,
        Err(e) => {
            let message = format!("GET request failed{}: {}", suffix, describe_reqwest_error(&e));
            warn!("   {}", message);
            result.content_error = Some(message);
            return result;
        }
    };

    result.signals = Some(
        extract_page_signals(
            &final_url,
            &page,
            &result.request.links,
            client,
            ctx.options.head_timeout,
        )
        .await,
    );

    match &ctx.search {
        Some(search) => result.indexing = Some(check_index(search, &final_url).await),
        None => info!("   Index check skipped (no API key configured)"),
    }
    result
}

async fn check_index(search: &SearchClient, final_url: &str) -> IndexingVerdict {
    match search.check_indexing(final_url).await {
        Ok((indexed, search_query)) => {
            info!(
                "   {}",
                if indexed {
                    "URL is indexed"
                } else {
                    "URL is not indexed"
                }
            );
            IndexingVerdict {
                status: if indexed {
                    IndexStatus::Indexed
                } else {
                    IndexStatus::NotIndexed
                },
                search_query,
            }
        }
        Err(e) => {
            warn!("   Index check failed: {}", e);
            IndexingVerdict {
                status: IndexStatus::CheckFailed,
                search_query: build_search_query(final_url),
            }
        }
    }
}

/// Checks all rows, at most `max_concurrency` at a time.
///
/// Results come back in input order. With `max_concurrency` of 1 the rows
/// are checked strictly one after another.
pub async fn check_rows(
    requests: Vec<CheckRequest>,
    ctx: &ProcessingContext,
    max_concurrency: usize,
) -> Vec<CheckResult> {
    stream::iter(requests.into_iter().enumerate())
        .map(|(index, request)| async move {
            if request.target_url.trim().is_empty() {
                info!("{}. URL is empty, skipping", index + 1);
            } else {
                info!("{}. Checking: {}", index + 1, request.target_url);
            }
            check_row(request, ctx).await
        })
        .buffered(max_concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineOptions;
    use crate::error_handling::ErrorType;
    use crate::initialization::init_clients;
    use crate::models::{ExpectedLink, Presence};
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use std::time::Duration;

    fn context(search: Option<SearchClient>) -> ProcessingContext {
        let options = PipelineOptions::default();
        let clients = init_clients(&options).expect("clients");
        ProcessingContext::new(clients, options, search)
    }

    #[tokio::test]
    async fn test_non_200_skips_content_checks() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/missing"))
                .respond_with(status_code(404)),
        );

        let result = check_row(
            CheckRequest::new(server.url_str("/missing"), vec![ExpectedLink::default()]),
            &context(None),
        )
        .await;
        assert_eq!(result.resolution.final_status_code, 404);
        assert!(result.signals.is_none());
        assert!(result.content_error.is_none());
        assert!(result.indexing.is_none());
    }

    #[tokio::test]
    async fn test_get_failure_is_recorded_for_both_checks() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/page"))
                .respond_with(status_code(200)),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/page"))
                .respond_with(status_code(500)),
        );

        let result = check_row(
            CheckRequest::new(server.url_str("/page"), vec![]),
            &context(None),
        )
        .await;
        assert!(result.resolution.is_ok());
        let error = result.seo_check_error().expect("GET failure recorded");
        assert!(error.starts_with("GET request failed"));
        assert_eq!(result.link_check_error(), Some(error));
        assert!(result.signals.is_none());
    }

    #[tokio::test]
    async fn test_empty_url_row() {
        let result = check_row(CheckRequest::new("", vec![]), &context(None)).await;
        assert_eq!(result.resolution.error_type, Some(ErrorType::EmptyUrl));
        assert_eq!(result.resolution.final_status_code, 0);
    }

    #[tokio::test]
    async fn test_search_build_failure_is_check_failed() {
        let server = httptest::ServerBuilder::new()
            .bind_addr("127.0.0.1:0".parse().unwrap())
            .run()
            .unwrap();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/page"))
                .respond_with(status_code(200)),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/page"))
                .respond_with(status_code(200).body("<html></html>")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/robots.txt"))
                .times(2)
                .respond_with(status_code(404)),
        );
        let search = SearchClient::new(
            reqwest::Client::new(),
            "key",
            "not a url",
            Duration::from_secs(5),
        );

        let result = check_row(
            CheckRequest::new(server.url_str("/page"), vec![]),
            &context(Some(search)),
        )
        .await;
        let verdict = result.indexing.expect("index check ran");
        assert_eq!(verdict.status, IndexStatus::CheckFailed);
        assert!(verdict.search_query.starts_with("site:127.0.0.1:"));
    }

    #[tokio::test]
    async fn test_rows_keep_input_order() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/a"))
                .respond_with(delay_and_then(Duration::from_millis(200), status_code(301))),
        );
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/b"))
                .respond_with(status_code(404)),
        );

        let requests = vec![
            CheckRequest::new(server.url_str("/a"), vec![]),
            CheckRequest::new(server.url_str("/b"), vec![]),
            CheckRequest::new("", vec![]),
        ];
        let results = check_rows(requests, &context(None), 3).await;
        let codes: Vec<u16> = results
            .iter()
            .map(|r| r.resolution.final_status_code)
            .collect();
        assert_eq!(codes, vec![301, 404, 0]);
    }

    #[tokio::test]
    async fn test_full_row() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/start")).respond_with(
                status_code(301).insert_header("Location", "/article"),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/article"))
                .respond_with(status_code(200)),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/article")).respond_with(
                status_code(200).body(
                    r#"<html><head><link rel="canonical" href="/article"></head>
                    <body><a href="https://shop.example/">Shop</a></body></html>"#,
                ),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/robots.txt"))
                .times(2)
                .respond_with(status_code(200).body("User-agent: *\nDisallow:")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/search")).respond_with(
                json_encoded(serde_json::json!({"organic_results": [{"position": 1}]})),
            ),
        );
        let search = SearchClient::new(
            reqwest::Client::new(),
            "key",
            server.url_str("/search"),
            Duration::from_secs(5),
        );

        let result = check_row(
            CheckRequest::new(
                server.url_str("/start"),
                vec![
                    ExpectedLink::new(Some("shop"), Some("https://shop.example")),
                    ExpectedLink::default(),
                ],
            ),
            &context(Some(search)),
        )
        .await;

        assert_eq!(result.resolution.initial_status_code, 301);
        assert_eq!(result.resolution.redirect_chain.len(), 1);
        assert_eq!(result.resolution.final_url, server.url_str("/article"));
        assert!(!result.has_content_errors());
        let signals = result.signals.as_ref().expect("signals");
        assert_eq!(signals.robots_allowed_for_star, Some(true));
        assert_eq!(
            signals.canonical_url.as_deref(),
            Some(server.url_str("/article").as_str())
        );
        let checks = result.link_checks();
        assert_eq!(checks[0].found, Presence::Yes);
        assert_eq!(checks[0].anchor_matches, Presence::Yes);
        assert_eq!(checks[1].found, Presence::NotApplicable);
        let verdict = result.indexing.as_ref().expect("index check ran");
        assert_eq!(verdict.status, IndexStatus::Indexed);
    }
}
