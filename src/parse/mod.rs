//! Page signal extraction.
//!
//! This module extracts the SEO signals a link placement depends on:
//! - robots.txt permission for the page (fetched from the page's origin)
//! - `noindex`/`nofollow` directives from headers and meta tags
//! - the canonical URL
//! - presence, anchor text and `rel` of the expected links
//!
//! HTML is parsed with the `scraper` crate; malformed markup is handled
//! tolerantly and never causes an error.

mod canonical;
mod directives;
mod links;
mod robots;

// Re-export public API
pub use canonical::{canonical_from_document, check_canonical_tag};
pub use directives::{check_indexing_directives, indexing_directives_from_document};
pub use links::{check_links_on_page, links_from_document};
pub use robots::{check_robots_txt, RobotsRules};
