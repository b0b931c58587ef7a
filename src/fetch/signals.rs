//! Signal extraction for a fetched page.
//!
//! robots.txt is consulted first for both crawlers. The document-based checks
//! then run in order inside one error region: a failure records
//! `seo_check_error`, keeps the results gathered so far and skips the rest.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};
use scraper::Html;
use url::Url;

use crate::config::ROBOTS_USER_AGENTS;
use crate::fetch::content::PageContent;
use crate::models::{ExpectedLink, PageSignals};
use crate::parse::{
    canonical_from_document, check_robots_txt, indexing_directives_from_document,
    links_from_document,
};

/// Runs every page-level check against fetched content.
///
/// `client` is used for robots.txt and must share the TLS mode of the
/// request that produced `page`.
pub async fn extract_page_signals(
    final_url: &str,
    page: &PageContent,
    expected_links: &[ExpectedLink],
    client: &reqwest::Client,
    robots_timeout: Duration,
) -> PageSignals {
    let [star, googlebot] = ROBOTS_USER_AGENTS;
    let mut signals = PageSignals {
        robots_allowed_for_star: Some(
            check_robots_txt(client, final_url, star, robots_timeout).await,
        ),
        robots_allowed_for_googlebot: Some(
            check_robots_txt(client, final_url, googlebot, robots_timeout).await,
        ),
        ..PageSignals::default()
    };

    if let Err(e) = extract_document_signals(&mut signals, final_url, page, expected_links) {
        let message = format!("SEO/link check failed: {:#}", e);
        warn!("   {}", message);
        signals.seo_check_error = Some(message);
    }
    signals
}

fn extract_document_signals(
    signals: &mut PageSignals,
    final_url: &str,
    page: &PageContent,
    expected_links: &[ExpectedLink],
) -> Result<()> {
    Url::parse(final_url).with_context(|| format!("unusable page URL '{}'", final_url))?;
    let document = Html::parse_document(&page.html);

    signals.indexing_directives = Some(indexing_directives_from_document(
        &page.headers,
        &document,
    ));
    signals.canonical_url = canonical_from_document(final_url, &document);

    let report = links_from_document(&document, final_url, expected_links);
    if let Some(error) = &report.error {
        debug!("Link check error for {}: {}", final_url, error);
    }
    signals.link_checks = report.slots;
    signals.link_check_error = report.error;
    Ok(())
}
