//! Logger initialization.
//!
//! Plain output is meant for a person watching an audit row by row; JSON
//! output is one object per line for log collectors.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

const CRATE_TARGET: &str = "link_audit";

/// Initializes the logger with the specified level and format.
///
/// The logger reads the `RUST_LOG` environment variable first; `level`
/// overrides it for this crate and as the global default. Chatty dependency
/// modules are capped so that row progress stays readable.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug link_audit links.csv
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=link_audit=debug,reqwest=info link_audit links.csv
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(matches!(format, LogFormat::Plain));

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    // html5ever reports every tolerated markup error on broken pages
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module(CRATE_TARGET, level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let time = chrono::Local::now().format("%H:%M:%S");
                // Row progress comes from this crate; only foreign modules get a target tag
                if record.target().starts_with(CRATE_TARGET) {
                    writeln!(
                        buf,
                        "{} {} [{}] {}",
                        time.to_string().dimmed(),
                        level_emoji(level),
                        colored_level(level),
                        record.args()
                    )
                } else {
                    writeln!(
                        buf,
                        "{} {} [{}] {} {}",
                        time.to_string().dimmed(),
                        level_emoji(level),
                        colored_level(level),
                        record.target().cyan(),
                        record.args()
                    )
                }
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✔️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}

fn colored_level(level: Level) -> ColoredString {
    let text = level.to_string();
    match level {
        Level::Error => text.red(),
        Level::Warn => text.yellow(),
        Level::Info => text.green(),
        Level::Debug => text.blue(),
        Level::Trace => text.purple(),
    }
}

fn json_line(ts: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": ts,
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}
