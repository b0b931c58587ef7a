//! HTTP header constants.
//!
//! Header names and values shared by the page fetchers and the directive
//! extractor.

/// Response header carrying crawler directives
pub const HEADER_X_ROBOTS_TAG: &str = "x-robots-tag";

/// Accept header of a desktop Chrome navigation request
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
/// Accept-Language header of the same request
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// Referer used for navigation-like requests
pub const BROWSER_REFERER: &str = "https://www.google.com/";
