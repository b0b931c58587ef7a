//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use link_audit::initialization::init_logger_with;
use link_audit::{run_audit, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // VALUESERP_API_KEY may live in .env: current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_audit(config).await {
        Ok(report) => {
            println!(
                "✅ Checked {} row{} ({} fully successful, {} with request errors) in {:.1}s",
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.statistics.successful,
                report.statistics.request_errors,
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("link_audit error: {:#}", e);
            process::exit(1);
        }
    }
}
