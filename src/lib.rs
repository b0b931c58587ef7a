//! link_audit library: verification of link placements listed in a worksheet
//!
//! Every worksheet row names a page (`Url`) and up to three expected links on
//! it (anchor text plus target URL). For each page the library resolves the
//! HEAD redirect chain (retrying once without certificate verification when
//! the TLS handshake fails), reads robots.txt, the indexing directives and
//! the canonical tag, looks for the expected links, and optionally asks a
//! search API whether the page is indexed. Results are written back into the
//! worksheet.
//!
//! # Example
//!
//! ```no_run
//! use link_audit::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: "links.csv".to_string(),
//!     max_concurrency: 4,
//!     ..Default::default()
//! };
//!
//! let report = run_audit(config).await?;
//! println!("Checked {} rows: {} fully successful",
//!          report.total_rows, report.statistics.successful);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod parse;
pub mod search;
pub mod utils;
pub mod worksheet;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::{run_audit, AuditReport};

// Internal run module (contains the audit orchestration)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::app::{print_run_statistics, RunStatistics};
    use crate::config::Config;
    use crate::error_handling::WorksheetError;
    use crate::fetch::{check_rows, ProcessingContext};
    use crate::initialization::{init_clients, TlsMode};
    use crate::search::SearchClient;
    use crate::worksheet::{
        check_sheet_structure, display_sheet_validation_results, read_check_requests,
        update_worksheet_with_results, WorksheetSource,
    };

    /// Results of an audit run.
    #[derive(Debug, Clone)]
    pub struct AuditReport {
        /// Number of rows checked
        pub total_rows: usize,
        /// Aggregate outcome counts
        pub statistics: RunStatistics,
        /// CSV file the updated worksheet was written to
        pub output_path: PathBuf,
        /// Number of cells written or changed
        pub updated_cells: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs an audit with the provided configuration.
    ///
    /// Loads the worksheet, validates its structure, checks every data row,
    /// logs the run statistics and writes the updated worksheet to the
    /// output CSV.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid
    /// - HTTP clients cannot be built
    /// - The worksheet cannot be loaded, is malformed, or cannot be saved
    ///
    /// Failures of individual rows never abort the run; they are recorded in
    /// that row's result.
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        config
            .validate()
            .context("Configuration validation failed")?;

        let start_time = Instant::now();
        let options = config.pipeline_options();
        let clients = init_clients(&options).context("Failed to initialize HTTP clients")?;

        let source = WorksheetSource::from_input(&config.input)?;
        let output_path = source.output_path(config.output.as_deref());
        let mut sheet = source
            .load(&clients.for_mode(TlsMode::Verified).content, options.get_timeout)
            .await
            .context("Failed to load worksheet")?;

        let structure = check_sheet_structure(sheet.values());
        display_sheet_validation_results(&structure);
        structure.map_err(WorksheetError::from)?;

        let requests = read_check_requests(sheet.values());
        if requests.is_empty() {
            warn!("No rows to check");
        } else {
            info!("🚀 Checking {} row(s)", requests.len());
        }

        let search = config.search_api_key.as_ref().map(|key| {
            SearchClient::new(
                clients.for_mode(TlsMode::Verified).content.clone(),
                key.clone(),
                config.search_endpoint.clone(),
                options.get_timeout,
            )
        });
        let index_check_enabled = search.is_some();
        if !index_check_enabled {
            info!("No search API key configured; index check skipped");
        }

        let ctx = ProcessingContext::new(clients, options, search);
        let results = check_rows(requests, &ctx, config.max_concurrency).await;

        let statistics = RunStatistics::from_results(&results);
        print_run_statistics(&statistics, index_check_enabled);

        let updates = update_worksheet_with_results(&mut sheet, &results);
        sheet
            .write_csv(&output_path)
            .context("Failed to save worksheet")?;
        info!("💾 Results saved to {}", output_path.display());

        Ok(AuditReport {
            total_rows: results.len(),
            statistics,
            output_path,
            updated_cells: updates.len(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
