//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP clients (verified and unverified TLS)
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::{init_clients, ClientPair, HttpClients, TlsMode};
pub use logger::init_logger_with;
