//! HTTP redirect chain resolution.
//!
//! Redirects are followed by hand with HEAD requests so every hop's status
//! code is recorded, which a redirect-following client would hide.

use std::time::Duration;

use log::{info, warn};
use reqwest::{StatusCode, Url};

use crate::error_handling::ResolveError;
use crate::fetch::request::RequestHeaders;
use crate::models::RedirectHop;
use crate::utils::normalize_url;

/// Where a HEAD redirect chain ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResolution {
    /// Status of the first response
    pub initial_status_code: u16,
    /// Redirect responses in order, with normalized URLs
    pub chain: Vec<RedirectHop>,
    /// Normalized URL of the last response
    pub final_url: String,
    /// Status of the last response
    pub final_status_code: u16,
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Follows the redirect chain of `start_url` with HEAD requests.
///
/// `client` must have automatic redirects disabled. A redirect status without
/// a `Location` header ends the chain at that response.
///
/// # Errors
///
/// Returns `ResolveError::Transport` when a request fails,
/// `ResolveError::InvalidLocation` for an unusable `Location` header and
/// `ResolveError::TooManyRedirects` when more than `max_hops` redirects are
/// returned.
pub async fn resolve_redirect_chain(
    start_url: &str,
    max_hops: usize,
    client: &reqwest::Client,
    timeout: Duration,
) -> Result<RedirectResolution, ResolveError> {
    let mut chain: Vec<RedirectHop> = Vec::new();
    let mut initial_status_code = None;
    let mut final_status_code;
    let mut current = start_url.to_string();

    loop {
        let resp = RequestHeaders::apply_to_request_builder(client.head(&current))
            .timeout(timeout)
            .send()
            .await
            .map_err(ResolveError::Transport)?;

        let status = resp.status();
        let status_code = status.as_u16();
        initial_status_code.get_or_insert(status_code);
        final_status_code = status_code;

        if !is_redirect(status) {
            break;
        }
        let Some(loc) = resp.headers().get(reqwest::header::LOCATION) else {
            warn!(
                "Redirect status {} for {} but no Location header",
                status_code, current
            );
            break;
        };
        if chain.len() == max_hops {
            return Err(ResolveError::TooManyRedirects {
                url: start_url.to_string(),
                max_hops,
            });
        }

        let loc = loc.to_str().unwrap_or("").to_string();
        let next = Url::parse(&loc)
            .or_else(|_| Url::parse(&current).and_then(|base| base.join(&loc)))
            .map_err(|_| ResolveError::InvalidLocation {
                location: loc.clone(),
                from: current.clone(),
            })?;

        let hop = RedirectHop {
            url: normalize_url(&current),
            status_code,
        };
        info!("   {}. {} → {}", chain.len() + 1, hop.url, hop.status_code);
        chain.push(hop);
        current = next.to_string();
    }

    Ok(RedirectResolution {
        initial_status_code: initial_status_code.unwrap_or(final_status_code),
        chain,
        final_url: normalize_url(&current),
        final_status_code,
    })
}
