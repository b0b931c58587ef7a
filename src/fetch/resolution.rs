//! Target URL resolution with a single TLS fallback.
//!
//! The HEAD chain is first resolved with certificate verification on. If
//! that fails because of TLS, it is resolved once more with verification off
//! and the row remembers the original failure. Nothing else is retried.

use std::future::Future;

use log::{info, warn};

use crate::config::{PipelineOptions, MAX_REDIRECT_HOPS};
use crate::error_handling::{categorize_resolve_error, ErrorType, ResolveError};
use crate::fetch::redirects::{resolve_redirect_chain, RedirectResolution};
use crate::initialization::{HttpClients, TlsMode};
use crate::models::ResolutionOutcome;
use crate::utils::normalize_url;

/// Resolves the redirect chain of a target URL.
///
/// Never fails: request problems end up in `request_error` with status codes
/// of 0. An empty URL is rejected without a request.
pub async fn resolve_target(
    url: &str,
    clients: &HttpClients,
    options: &PipelineOptions,
) -> ResolutionOutcome {
    resolve_with_fallback(url, |mode| {
        resolve_redirect_chain(
            url,
            MAX_REDIRECT_HOPS,
            &clients.for_mode(mode).redirect,
            options.head_timeout,
        )
    })
    .await
}

async fn resolve_with_fallback<F, Fut>(url: &str, mut attempt: F) -> ResolutionOutcome
where
    F: FnMut(TlsMode) -> Fut,
    Fut: Future<Output = Result<RedirectResolution, ResolveError>>,
{
    let url = url.trim();
    if url.is_empty() {
        return ResolutionOutcome::unresolved("", "URL is empty", ErrorType::EmptyUrl, false);
    }

    let first_error = match attempt(TlsMode::Verified).await {
        Ok(resolution) => return resolved(resolution, TlsMode::Verified, None),
        Err(e) => e,
    };

    if !first_error.is_ssl() {
        warn!("   HEAD failed: {}", first_error);
        return ResolutionOutcome::unresolved(
            normalize_url(url),
            first_error.to_string(),
            categorize_resolve_error(&first_error),
            false,
        );
    }

    warn!("   TLS failure: {}", first_error);
    warn!("   Retrying with certificate verification disabled");
    match attempt(TlsMode::Unverified).await {
        Ok(resolution) => resolved(
            resolution,
            TlsMode::Unverified,
            Some(format!("SSL verification disabled: {}", first_error)),
        ),
        Err(second_error) => {
            let message = format!(
                "HEAD failed with SSL verification disabled: {} (initial error: {})",
                second_error, first_error
            );
            warn!("   {}", message);
            ResolutionOutcome::unresolved(
                normalize_url(url),
                message,
                categorize_resolve_error(&second_error),
                true,
            )
        }
    }
}

fn resolved(
    resolution: RedirectResolution,
    mode: TlsMode,
    request_error: Option<String>,
) -> ResolutionOutcome {
    let suffix = if mode.is_disabled() {
        " (SSL disabled)"
    } else {
        ""
    };
    if resolution.chain.is_empty() {
        info!(
            "   Status code{}: {} (no redirects)",
            suffix, resolution.final_status_code
        );
    } else {
        info!(
            "   Final URL{}: {} → {}",
            suffix, resolution.final_url, resolution.final_status_code
        );
    }

    ResolutionOutcome {
        initial_status_code: resolution.initial_status_code,
        redirect_chain: resolution.chain,
        final_url: resolution.final_url,
        final_status_code: resolution.final_status_code,
        ssl_fallback_used: mode.is_disabled(),
        request_error,
        error_type: None,
    }
}
