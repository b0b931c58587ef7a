//! Row checking pipeline.
//!
//! This module implements the per-row state machine:
//! - HEAD redirect resolution with one TLS fallback
//! - page content retrieval (only for a final status of 200)
//! - robots.txt, directive, canonical and link checks
//! - the optional search-index check
//!
//! Failures never leave a row: they are recorded in its `CheckResult`.

mod content;
mod context;
mod pipeline;
mod redirects;
mod request;
mod resolution;
mod signals;

// Re-export public API
pub use content::{fetch_page_content, PageContent};
pub use context::ProcessingContext;
pub use pipeline::{check_row, check_rows};
pub use redirects::{resolve_redirect_chain, RedirectResolution};
pub(crate) use request::RequestHeaders;
pub use resolution::resolve_target;
pub use signals::extract_page_signals;
