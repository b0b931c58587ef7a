//! Extraction of check requests from worksheet rows.

use log::{debug, warn};

use crate::models::{CheckRequest, ExpectedLink};

use super::labels::{ANCHOR_COLUMNS, COLUMN_URL, LINK_URL_COLUMNS, MANDATORY_COLUMNS};

fn column_index(headers: &[String], label: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == label)
}

fn cell(row: &[String], index: Option<usize>) -> Option<&str> {
    index.and_then(|i| row.get(i)).map(String::as_str)
}

/// Builds one `CheckRequest` per usable data row.
///
/// Rows too short to hold every mandatory column and rows with an empty
/// `Url` are skipped with a warning. Optional anchor and link columns that
/// are absent or blank become empty slots. Each request remembers its
/// 1-based sheet row (the header is row 1).
pub fn read_check_requests(values: &[Vec<String>]) -> Vec<CheckRequest> {
    let Some(headers) = values.first() else {
        return Vec::new();
    };
    let Some(url_index) = column_index(headers, COLUMN_URL) else {
        warn!("Column '{}' not found; nothing to check", COLUMN_URL);
        return Vec::new();
    };
    let min_required_len = MANDATORY_COLUMNS
        .iter()
        .filter_map(|label| column_index(headers, label))
        .max()
        .map_or(0, |max| max + 1);

    let slot_columns: Vec<(Option<usize>, Option<usize>)> = ANCHOR_COLUMNS
        .iter()
        .zip(LINK_URL_COLUMNS.iter())
        .map(|(anchor, url)| (column_index(headers, anchor), column_index(headers, url)))
        .collect();

    let mut requests = Vec::new();
    for (offset, row) in values.iter().enumerate().skip(1) {
        let sheet_row = offset + 1;
        if row.iter().all(|c| c.trim().is_empty()) {
            debug!("Row {}: blank, skipping", sheet_row);
            continue;
        }
        if row.len() < min_required_len {
            warn!(
                "Row {}: skipping short row (fewer than {} columns): {:?}",
                sheet_row, min_required_len, row
            );
            continue;
        }
        let target_url = row.get(url_index).map_or("", |c| c.trim());
        if target_url.is_empty() {
            warn!("Row {}: empty '{}', skipping", sheet_row, COLUMN_URL);
            continue;
        }

        let links = slot_columns
            .iter()
            .map(|(anchor, url)| ExpectedLink::new(cell(row, *anchor), cell(row, *url)))
            .collect();
        requests.push(CheckRequest::new(target_url, links).with_source_row(sheet_row));
    }
    requests
}
