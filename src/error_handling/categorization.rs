//! Error categorization and message extraction.
//!
//! `reqwest` keeps the interesting part of a failure (the TLS library's
//! complaint, the refused connection) in the error's source chain, so the
//! helpers here walk that chain.

use std::error::Error as StdError;

use super::types::{ErrorType, ResolveError};
use crate::utils::is_ssl_error;

/// Renders a `reqwest::Error` with its full source chain.
///
/// Causes already contained in the text so far are skipped, which keeps
/// wrappers that repeat their inner message from doubling it.
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Text of the error's causes only, without the top-level message.
///
/// The top-level message of a request error embeds the URL, which must not
/// take part in SSL classification (`https://ssl.example.com/` is not a TLS
/// failure).
pub fn error_cause_text(error: &(dyn StdError + 'static)) -> String {
    let mut parts = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

/// Whether a request failed because of TLS (handshake, certificate, protocol).
pub fn is_tls_failure(error: &reqwest::Error) -> bool {
    is_ssl_error(&error_cause_text(error))
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if is_tls_failure(error) {
        // TLS failures also report is_connect(), so this check comes first
        ErrorType::HttpRequestTlsError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_status() {
        ErrorType::HttpRequestStatusError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes a redirect-resolution failure.
pub fn categorize_resolve_error(error: &ResolveError) -> ErrorType {
    match error {
        ResolveError::Transport(e) => categorize_reqwest_error(e),
        ResolveError::TooManyRedirects { .. } | ResolveError::InvalidLocation { .. } => {
            ErrorType::HttpRequestRedirectError
        }
    }
}

impl ResolveError {
    /// Whether this failure should trigger the unverified-TLS retry.
    pub fn is_ssl(&self) -> bool {
        match self {
            ResolveError::Transport(e) => is_tls_failure(e),
            _ => false,
        }
    }
}
