//! Where a worksheet comes from and where the audited copy goes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;

use crate::config::DEFAULT_SHEET_OUTPUT;
use crate::error_handling::WorksheetError;
use crate::utils::extract_sheet_id_and_tab;

use super::Worksheet;

/// Worksheet input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorksheetSource {
    /// A local CSV file
    File(PathBuf),
    /// A Google Sheets tab, read through its public CSV export
    GoogleSheet {
        /// Spreadsheet identifier from the `/d/<id>` path segment
        id: String,
        /// Tab identifier (`gid`)
        gid: u64,
    },
}

impl WorksheetSource {
    /// Interprets a CLI input: `http(s)` URLs are Google Sheets links,
    /// anything else is a file path.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::InvalidSheetUrl` for a URL without a
    /// spreadsheet identifier.
    pub fn from_input(input: &str) -> Result<Self, WorksheetError> {
        let trimmed = input.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Ok(WorksheetSource::File(PathBuf::from(trimmed)));
        }
        let (id, gid) = extract_sheet_id_and_tab(trimmed)
            .ok_or_else(|| WorksheetError::InvalidSheetUrl(trimmed.to_string()))?;
        Ok(WorksheetSource::GoogleSheet { id, gid })
    }

    /// CSV export URL of a Google Sheets tab.
    pub fn export_url(&self) -> Option<String> {
        match self {
            WorksheetSource::File(_) => None,
            WorksheetSource::GoogleSheet { id, gid } => Some(sheet_export_url(id, *gid)),
        }
    }

    /// Loads the worksheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the export cannot be
    /// downloaded, or the content is not valid CSV.
    pub async fn load(
        &self,
        client: &reqwest::Client,
        timeout: Duration,
    ) -> Result<Worksheet, WorksheetError> {
        match self {
            WorksheetSource::File(path) => {
                info!("Reading worksheet from {}", path.display());
                Worksheet::from_path(path)
            }
            WorksheetSource::GoogleSheet { id, gid } => {
                download_csv(client, &sheet_export_url(id, *gid), timeout).await
            }
        }
    }

    /// Output path: the explicit one, else the input file itself, else
    /// the default results file.
    pub fn output_path(&self, explicit: Option<&Path>) -> PathBuf {
        match (explicit, self) {
            (Some(path), _) => path.to_path_buf(),
            (None, WorksheetSource::File(path)) => path.clone(),
            (None, WorksheetSource::GoogleSheet { .. }) => PathBuf::from(DEFAULT_SHEET_OUTPUT),
        }
    }
}

fn sheet_export_url(id: &str, gid: u64) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
        id, gid
    )
}

async fn download_csv(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Worksheet, WorksheetError> {
    info!("Downloading worksheet from {}", url);
    let body = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(WorksheetError::Download)?
        .bytes()
        .await
        .map_err(WorksheetError::Download)?;
    Worksheet::from_reader(String::from_utf8_lossy(&body).as_bytes())
}
