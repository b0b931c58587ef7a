//! Tests for command-line parsing of `Config`.

use clap::Parser;
use link_audit::config::{LogFormat, LogLevel};
use link_audit::Config;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let config = Config::try_parse_from(["link_audit", "links.csv"]).expect("should parse");
    assert_eq!(config.input, "links.csv");
    assert_eq!(config.output, None);
    assert!(matches!(config.log_level, LogLevel::Info));
    assert!(matches!(config.log_format, LogFormat::Plain));
    assert_eq!(config.head_timeout_seconds, 10);
    assert_eq!(config.get_timeout_seconds, 15);
    assert_eq!(config.max_concurrency, 1);
    assert_eq!(config.search_endpoint, "https://api.valueserp.com/search");
    assert!(config.user_agent.contains("Chrome/"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_all_options() {
    let config = Config::try_parse_from([
        "link_audit",
        "https://docs.google.com/spreadsheets/d/abc/edit#gid=3",
        "--output",
        "audited.csv",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--user-agent",
        "AuditBot/1.0",
        "--head-timeout-seconds",
        "3",
        "--get-timeout-seconds",
        "20",
        "--search-api-key",
        "secret",
        "--search-endpoint",
        "http://localhost:9000/search",
        "--max-concurrency",
        "8",
    ])
    .expect("should parse");

    assert_eq!(config.output, Some(PathBuf::from("audited.csv")));
    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
    assert_eq!(config.user_agent, "AuditBot/1.0");
    assert_eq!(config.search_api_key.as_deref(), Some("secret"));
    assert_eq!(config.max_concurrency, 8);

    let options = config.pipeline_options();
    assert_eq!(options.head_timeout.as_secs(), 3);
    assert_eq!(options.get_timeout.as_secs(), 20);
    assert_eq!(options.user_agent, "AuditBot/1.0");
}

#[test]
fn test_input_is_required() {
    assert!(Config::try_parse_from(["link_audit"]).is_err());
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Config::try_parse_from(["link_audit", "a.csv", "--log-level", "verbose"]).is_err());
    assert!(Config::try_parse_from(["link_audit", "a.csv", "--log-format", "xml"]).is_err());
    assert!(
        Config::try_parse_from(["link_audit", "a.csv", "--head-timeout-seconds", "-1"]).is_err()
    );
}
