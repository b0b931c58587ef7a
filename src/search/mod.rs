//! Search-index presence checks.
//!
//! A page counts as indexed when a `site:` search for it returns at least one
//! organic result.

mod client;
mod query;

pub use client::SearchClient;
pub use query::build_search_query;
