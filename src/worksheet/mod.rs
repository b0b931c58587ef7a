//! Worksheet adapter.
//!
//! This module provides:
//! - Loading a worksheet from a CSV file or a public Google Sheets export
//! - Structure validation of the mandatory columns
//! - Conversion of data rows into check requests
//! - Diffed write-back of check results and CSV output

mod labels;
mod rows;
mod source;
mod structure;
mod write;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};

use crate::error_handling::WorksheetError;

pub use labels::*;
pub use rows::read_check_requests;
pub use source::WorksheetSource;
pub use structure::{check_sheet_structure, display_sheet_validation_results};
pub use write::{column_letter, update_worksheet_with_results, CellUpdate};

/// A worksheet as a grid of cell values, header row first.
///
/// Rows may have different lengths; missing trailing cells are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    values: Vec<Vec<String>>,
}

impl Worksheet {
    /// Wraps an existing grid.
    pub fn new(values: Vec<Vec<String>>) -> Self {
        Self { values }
    }

    /// All rows, header first.
    pub fn values(&self) -> &[Vec<String>] {
        &self.values
    }

    /// Parses CSV content. A leading byte-order mark is dropped.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::Csv` if the content is not valid CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WorksheetError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut values = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            values.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        if let Some(first) = values.first_mut().and_then(|row| row.first_mut()) {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }
        Ok(Self { values })
    }

    /// Reads a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_path(path: &Path) -> Result<Self, WorksheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Writes the grid to a CSV file, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        for row in &self.values {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
