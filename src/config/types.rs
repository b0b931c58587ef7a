//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_SEARCH_ENDPOINT, DEFAULT_USER_AGENT, GET_TIMEOUT_SECS, HEAD_TIMEOUT_SECS,
    SEARCH_API_KEY_ENV,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Audit configuration.
///
/// Parsed from the command line by the binary, or built programmatically
/// (usually starting from `Config::default()`) by library users.
///
/// # Examples
///
/// ```bash
/// # Audit a local worksheet export, results written back into the same file
/// link_audit links.csv
///
/// # Audit a public Google Sheet tab and check search-index presence
/// VALUESERP_API_KEY=... link_audit "https://docs.google.com/spreadsheets/d/<id>/edit#gid=0" --output audited.csv
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_audit",
    about = "Audits a worksheet of link placements: redirects, robots rules, canonical tags, anchors and index presence."
)]
pub struct Config {
    /// Worksheet to audit: a CSV file path or a Google Sheets URL
    #[arg(value_parser)]
    pub input: String,

    /// Where to write the updated worksheet (CSV).
    ///
    /// Defaults to the input file for CSV input, and to `link_audit_results.csv`
    /// for Google Sheets input.
    #[arg(long, value_parser)]
    pub output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Timeout for HEAD and robots.txt requests, in seconds
    #[arg(long, default_value_t = HEAD_TIMEOUT_SECS)]
    pub head_timeout_seconds: u64,

    /// Timeout for full-page GET requests, in seconds
    #[arg(long, default_value_t = GET_TIMEOUT_SECS)]
    pub get_timeout_seconds: u64,

    /// ValueSerp API key; the index check is skipped when absent
    #[arg(long, env = SEARCH_API_KEY_ENV, hide_env_values = true)]
    pub search_api_key: Option<String>,

    /// Search API endpoint
    #[arg(long, default_value = DEFAULT_SEARCH_ENDPOINT)]
    pub search_endpoint: String,

    /// Number of rows checked at the same time (1 = strictly sequential)
    #[arg(long, default_value_t = 1)]
    pub max_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: "links.csv".to_string(),
            output: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            head_timeout_seconds: HEAD_TIMEOUT_SECS,
            get_timeout_seconds: GET_TIMEOUT_SECS,
            search_api_key: None,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            max_concurrency: 1,
        }
    }
}

/// A configuration value that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: String,
    /// What is wrong and what is accepted
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl Config {
    /// Checks option values that clap cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "input",
                "a CSV path or Google Sheets URL is required",
            ));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigValidationError::new(
                "max_concurrency",
                "must be greater than 0 (use 1 for sequential processing)",
            ));
        }
        if self.head_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "head_timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.get_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "get_timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "user_agent",
                "must not be empty",
            ));
        }
        if let Some(key) = &self.search_api_key {
            if key.trim().is_empty() {
                return Err(ConfigValidationError::new(
                    "search_api_key",
                    "must not be blank; omit it to skip the index check",
                ));
            }
        }
        if url::Url::parse(&self.search_endpoint).is_err() {
            return Err(ConfigValidationError::new(
                "search_endpoint",
                format!("'{}' is not an absolute URL", self.search_endpoint),
            ));
        }
        Ok(())
    }

    /// The request settings the pipeline needs, as explicit values.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            user_agent: self.user_agent.clone(),
            head_timeout: Duration::from_secs(self.head_timeout_seconds),
            get_timeout: Duration::from_secs(self.get_timeout_seconds),
        }
    }
}

/// Per-request settings handed to the verification pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Timeout for HEAD and robots.txt requests
    pub head_timeout: Duration,
    /// Timeout for the full-page GET
    pub get_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Config::default().pipeline_options()
    }
}
