//! Worksheet structure validation.

use std::collections::BTreeMap;

use log::{error, info};

use crate::error_handling::SheetStructureError;

use super::labels::{COLUMN_URL, MANDATORY_COLUMNS};

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn header_labels(values: &[Vec<String>]) -> Vec<String> {
    values
        .first()
        .map(|row| row.iter().map(|h| h.trim().to_string()).collect())
        .unwrap_or_default()
}

/// Checks that a sheet can be audited.
///
/// The header row must contain every mandatory column, in the order
/// `Анкор-1`, `Урл-1`, `Url` (other columns may sit anywhere), and no data
/// row may leave a mandatory cell empty. Entirely blank rows are ignored.
///
/// # Errors
///
/// Returns the first structural problem found.
pub fn check_sheet_structure(values: &[Vec<String>]) -> Result<(), SheetStructureError> {
    if values.first().map_or(true, |row| is_blank_row(row)) {
        return Err(SheetStructureError::EmptySheet);
    }
    let headers = header_labels(values);

    let missing: Vec<String> = MANDATORY_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SheetStructureError::MissingHeaders {
            missing,
            actual: headers,
        });
    }

    let positions: Vec<usize> = MANDATORY_COLUMNS
        .iter()
        .filter_map(|column| headers.iter().position(|h| h == column))
        .collect();
    if positions.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(SheetStructureError::WrongOrder {
            expected: MANDATORY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            actual: headers,
        });
    }

    let mut missing_data: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (offset, row) in values.iter().enumerate().skip(1) {
        if is_blank_row(row) {
            continue;
        }
        let sheet_row = offset + 1;
        for (column, position) in MANDATORY_COLUMNS.iter().zip(&positions) {
            if row.get(*position).map_or(true, |cell| cell.trim().is_empty()) {
                missing_data
                    .entry(column.to_string())
                    .or_default()
                    .push(sheet_row);
            }
        }
    }
    if !missing_data.is_empty() {
        return Err(SheetStructureError::MissingData(missing_data));
    }

    Ok(())
}

/// Logs the outcome of [`check_sheet_structure`] with hints for fixing it.
pub fn display_sheet_validation_results(result: &Result<(), SheetStructureError>) {
    info!("🔍 Worksheet check");
    let err = match result {
        Ok(()) => {
            info!("✅ The worksheet has the expected structure");
            info!("   All mandatory column headers are in place");
            info!("   All mandatory cells are filled");
            return;
        }
        Err(e) => e,
    };

    error!("Problems found in the worksheet:");
    match err {
        SheetStructureError::EmptySheet => {
            error!("   {}", err);
            error!("   Check that the sheet (and the selected tab) contains data");
        }
        SheetStructureError::MissingHeaders { actual, .. }
        | SheetStructureError::WrongOrder { actual, .. } => {
            error!("   {}", err);
            error!("   Required (in order): {}", MANDATORY_COLUMNS.join(", "));
            error!("   Found: {}", actual.join(", "));
            error!(
                "   Other columns may appear anywhere, but '{}' must come after the first anchor and link columns",
                COLUMN_URL
            );
        }
        SheetStructureError::MissingData(missing) => {
            error!("   Mandatory columns have empty cells:");
            for (column, rows) in missing {
                let rows: Vec<String> = rows.iter().map(ToString::to_string).collect();
                error!("   - Column '{}', rows: {}", column, rows.join(", "));
            }
            error!("   Fill in every mandatory cell in the rows listed");
        }
    }
}
