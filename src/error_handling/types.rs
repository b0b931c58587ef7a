//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use std::collections::BTreeMap;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use super::categorization::describe_reqwest_error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure while following the HEAD redirect chain of a target URL.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The request could not be sent or no response arrived.
    #[error("{}", describe_reqwest_error(.0))]
    Transport(ReqwestError),

    /// The chain did not settle within the hop limit.
    #[error("Too many redirects (more than {max_hops}) starting at {url}")]
    TooManyRedirects {
        /// URL the chain started from
        url: String,
        /// Hop limit that was exceeded
        max_hops: usize,
    },

    /// A redirect pointed somewhere that is not a URL.
    #[error("Invalid redirect location '{location}' returned by {from}")]
    InvalidLocation {
        /// Raw `Location` header value
        location: String,
        /// URL that returned it
        from: String,
    },
}

/// Failure to build or send a search-index request.
///
/// Transport and response problems never surface here; the checker reports
/// those as "not indexed".
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request could not be constructed (bad endpoint URL and the like).
    #[error("Search request could not be built: {}", describe_reqwest_error(.0))]
    Request(ReqwestError),
}

/// Structural problems in a worksheet that stop the audit before any request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetStructureError {
    /// The sheet has no header row at all.
    #[error("The worksheet is empty")]
    EmptySheet,

    /// Mandatory column headers are absent.
    #[error("Missing mandatory columns: {}", .missing.join(", "))]
    MissingHeaders {
        /// Mandatory headers not present in the header row
        missing: Vec<String>,
        /// Header row as found
        actual: Vec<String>,
    },

    /// Mandatory columns are present but in the wrong relative order.
    #[error("Mandatory columns are out of order: expected {}", .expected.join(" < "))]
    WrongOrder {
        /// Required relative order
        expected: Vec<String>,
        /// Header row as found
        actual: Vec<String>,
    },

    /// Data rows with empty mandatory cells, keyed by column label.
    #[error("Mandatory columns have empty cells: {}", format_missing_data(.0))]
    MissingData(BTreeMap<String, Vec<usize>>),
}

fn format_missing_data(missing: &BTreeMap<String, Vec<usize>>) -> String {
    missing
        .iter()
        .map(|(column, rows)| {
            let rows: Vec<String> = rows.iter().map(ToString::to_string).collect();
            format!("{} (rows {})", column, rows.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors loading, validating or saving a worksheet.
#[derive(Error, Debug)]
pub enum WorksheetError {
    /// A Google Sheets URL without a spreadsheet identifier.
    #[error("Invalid Google Sheets URL format: {0}")]
    InvalidSheetUrl(String),

    /// The sheet export could not be downloaded.
    #[error("Failed to download worksheet: {}", describe_reqwest_error(.0))]
    Download(ReqwestError),

    /// The sheet does not have the expected structure.
    #[error(transparent)]
    Structure(#[from] SheetStructureError),

    /// Reading or writing the CSV file failed.
    #[error("Worksheet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV content could not be parsed or written.
    #[error("Worksheet CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Types of errors that can occur while checking a row.
///
/// This enum categorizes actual error conditions - failures that prevent a
/// check from completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Input errors
    EmptyUrl,
    // HEAD (resolution) errors
    HttpRequestBuilderError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestTlsError,
    HttpRequestRedirectError,
    HttpRequestStatusError,
    HttpRequestOtherError,
    // Page content and extraction errors
    ContentFetchError,
    SignalExtractionError,
    LinkCheckError,
    // Search-index errors
    IndexCheckError,
}

/// Types of warnings found on successfully checked pages.
///
/// Warnings indicate placements that are live but may not pass link equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    RobotsDisallowed,
    Noindex,
    Nofollow,
    CanonicalElsewhere,
    LinkMissing,
    AnchorMismatch,
    NotIndexed,
}

/// Types of informational metrics.
///
/// Info metrics track useful data points that aren't errors or warnings,
/// such as redirects or the SSL fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    // HTTP redirects
    HttpRedirect,  // HTTP redirect occurred (301, 302, etc.)
    HttpsRedirect, // HTTP to HTTPS redirect
    MultipleRedirects,
    // TLS
    SslFallback, // Certificate verification was disabled for the row
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::EmptyUrl => "Empty URL",
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestTlsError => "TLS/SSL error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestStatusError => "HTTP request status error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::ContentFetchError => "Page content fetch error",
            ErrorType::SignalExtractionError => "SEO signal extraction error",
            ErrorType::LinkCheckError => "Link check error",
            ErrorType::IndexCheckError => "Index check error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::RobotsDisallowed => "Disallowed by robots.txt",
            WarningType::Noindex => "noindex directive",
            WarningType::Nofollow => "nofollow directive",
            WarningType::CanonicalElsewhere => "Canonical points elsewhere",
            WarningType::LinkMissing => "Expected link missing",
            WarningType::AnchorMismatch => "Anchor text mismatch",
            WarningType::NotIndexed => "Not indexed",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
            InfoType::MultipleRedirects => "Multiple redirects",
            InfoType::SslFallback => "SSL verification disabled",
        }
    }
}
