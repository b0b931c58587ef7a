//! Run statistics.
//!
//! Statistics are derived in a single pass over finished results, after every
//! row has been checked.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, OutcomeCounts, WarningType};
use crate::models::{CheckResult, IndexStatus, Presence};

/// Aggregate counts for one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStatistics {
    /// Rows checked
    pub total: usize,
    /// Final status 200 with all page checks completed
    pub successful: usize,
    /// Final status 200 but a page or link check failed
    pub with_content_errors: usize,
    /// Request failures that did not end in a 200
    pub request_errors: usize,
    /// Rows resolved with certificate verification disabled
    pub ssl_fallback: usize,
    /// Final status other than 0 and 200 without a request error
    pub other_status_codes: usize,
    pub indexed: usize,
    pub not_indexed: usize,
    pub index_check_failed: usize,
    /// Per-category breakdown
    pub counts: OutcomeCounts,
}

impl RunStatistics {
    /// Derives statistics from finished results.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut stats = RunStatistics {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            let resolution = &result.resolution;
            let final_ok = resolution.final_status_code == 200;

            if final_ok && !result.has_content_errors() {
                stats.successful += 1;
            }
            if final_ok && result.has_content_errors() {
                stats.with_content_errors += 1;
            }
            if resolution.request_error.is_some() && !final_ok {
                stats.request_errors += 1;
            }
            if resolution.ssl_fallback_used {
                stats.ssl_fallback += 1;
            }
            if !matches!(resolution.final_status_code, 0 | 200)
                && resolution.request_error.is_none()
            {
                stats.other_status_codes += 1;
            }
            match result.indexing.as_ref().map(|v| v.status) {
                Some(IndexStatus::Indexed) => stats.indexed += 1,
                Some(IndexStatus::NotIndexed) => stats.not_indexed += 1,
                Some(IndexStatus::CheckFailed) => stats.index_check_failed += 1,
                None => {}
            }

            record_outcomes(&mut stats.counts, result);
        }
        stats
    }

    /// Rows whose index presence was never checked.
    pub fn index_not_checked(&self) -> usize {
        self.total - self.indexed - self.not_indexed - self.index_check_failed
    }
}

fn record_outcomes(counts: &mut OutcomeCounts, result: &CheckResult) {
    let resolution = &result.resolution;

    if let Some(error_type) = resolution.error_type {
        counts.increment_error(error_type);
    }
    if result.content_error.is_some() {
        counts.increment_error(ErrorType::ContentFetchError);
    }

    if !resolution.redirect_chain.is_empty() {
        counts.increment_info(InfoType::HttpRedirect);
        if resolution.redirect_chain.len() > 1 {
            counts.increment_info(InfoType::MultipleRedirects);
        }
        let starts_plain = resolution
            .redirect_chain
            .first()
            .is_some_and(|hop| hop.url.starts_with("http://"));
        if starts_plain && resolution.final_url.starts_with("https://") {
            counts.increment_info(InfoType::HttpsRedirect);
        }
    }
    if resolution.ssl_fallback_used {
        counts.increment_info(InfoType::SslFallback);
    }

    if let Some(signals) = &result.signals {
        if signals.seo_check_error.is_some() {
            counts.increment_error(ErrorType::SignalExtractionError);
        }
        if signals.link_check_error.is_some() {
            counts.increment_error(ErrorType::LinkCheckError);
        }
        if signals.robots_allowed_for_star == Some(false)
            || signals.robots_allowed_for_googlebot == Some(false)
        {
            counts.increment_warning(WarningType::RobotsDisallowed);
        }
        if let Some(directives) = signals.indexing_directives {
            if directives.noindex {
                counts.increment_warning(WarningType::Noindex);
            }
            if directives.nofollow {
                counts.increment_warning(WarningType::Nofollow);
            }
        }
        if signals
            .canonical_url
            .as_deref()
            .is_some_and(|canonical| canonical != resolution.final_url)
        {
            counts.increment_warning(WarningType::CanonicalElsewhere);
        }
        for check in &signals.link_checks {
            match (check.found, check.anchor_matches) {
                (Presence::No, _) => counts.increment_warning(WarningType::LinkMissing),
                (Presence::Yes, Presence::No) => {
                    counts.increment_warning(WarningType::AnchorMismatch)
                }
                _ => {}
            }
        }
    }

    match result.indexing.as_ref().map(|v| v.status) {
        Some(IndexStatus::NotIndexed) => counts.increment_warning(WarningType::NotIndexed),
        Some(IndexStatus::CheckFailed) => counts.increment_error(ErrorType::IndexCheckError),
        _ => {}
    }
}

/// Logs run statistics.
///
/// The indexing block only appears when an index check was configured.
pub fn print_run_statistics(stats: &RunStatistics, index_check_enabled: bool) {
    info!("📊 Results for {} URL(s):", stats.total);
    info!(
        "   Successful (200) with SEO and link checks: {}",
        stats.successful
    );
    info!(
        "   Successful (200) with SEO/link check errors: {}",
        stats.with_content_errors
    );
    info!("   Request errors: {}", stats.request_errors);
    info!("   SSL verification disabled: {}", stats.ssl_fallback);
    info!("   Other status codes: {}", stats.other_status_codes);

    if index_check_enabled {
        info!("📊 Search index results:");
        info!("   Indexed: {}", stats.indexed);
        info!("   Not indexed: {}", stats.not_indexed);
        info!("   Index check errors: {}", stats.index_check_failed);
        info!(
            "   Not checked (no 200 status): {}",
            stats.index_not_checked()
        );
    }

    print_outcome_counts(&stats.counts);
}

/// Prints error, warning, and info counts to the log.
pub fn print_outcome_counts(counts: &OutcomeCounts) {
    let total_errors = counts.total_errors();
    let total_warnings = counts.total_warnings();
    let total_info = counts.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = counts.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = counts.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = counts.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
