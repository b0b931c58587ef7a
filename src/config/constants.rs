//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, redirect limits, and search API defaults.

/// Default User-Agent string for HTTP requests.
///
/// A desktop Chrome string. Sites that sniff for bots are less likely to
/// serve a different page (or an error) to a browser-like client.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.6167.184 Safari/537.36";

// Network operation timeouts
/// HEAD (redirect resolution) and robots.txt timeout in seconds
pub const HEAD_TIMEOUT_SECS: u64 = 10;
/// Full-page GET timeout in seconds
pub const GET_TIMEOUT_SECS: u64 = 15;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

/// User agents evaluated against robots.txt for every page.
pub const ROBOTS_USER_AGENTS: [&str; 2] = ["*", "Googlebot"];

// Search-index API
/// ValueSerp search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.valueserp.com/search";
/// Environment variable holding the search API key
pub const SEARCH_API_KEY_ENV: &str = "VALUESERP_API_KEY";
pub const SEARCH_GOOGLE_DOMAIN: &str = "google.com";
pub const SEARCH_COUNTRY: &str = "us";
pub const SEARCH_LANGUAGE: &str = "en";
/// Only one result is needed to tell indexed from not indexed
pub const SEARCH_RESULT_COUNT: u8 = 1;

/// Output file used when results cannot be written back next to the input
pub const DEFAULT_SHEET_OUTPUT: &str = "link_audit_results.csv";

/// Longest text a spreadsheet cell accepts
pub const MAX_CELL_TEXT_CHARS: usize = 50_000;
