//! Shared helpers.
//!
//! This module provides:
//! - Text and URL normalization for tolerant comparison
//! - Charset detection and decoding of fetched pages
//! - TLS failure classification
//! - CSS selector parsing utilities
//! - Cell text sanitization for worksheet output

mod encoding;
mod normalize;
pub mod sanitize;
mod selector;
mod ssl;

pub use encoding::{decode_body, detect_encoding};
pub use normalize::{extract_sheet_id_and_tab, normalize_text, normalize_url};
pub use selector::{parse_selector, select_all};
pub use ssl::is_ssl_error;
