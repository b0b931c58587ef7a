// Shared test helpers for worksheet setup and mock page serving.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use httptest::{matchers::*, responders::*, Expectation, Server};

/// Writes a CSV worksheet into `dir` and returns its path.
#[allow(dead_code)] // Used by other test files
pub fn write_sheet(dir: &Path, rows: &[&[&str]]) -> PathBuf {
    let path = dir.join("links.csv");
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&path)
        .expect("Failed to create worksheet file");
    for row in rows {
        writer.write_record(*row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush worksheet");
    path
}

/// Reads a CSV worksheet back as a grid.
#[allow(dead_code)] // Used by other test files
pub fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .expect("Failed to open worksheet");
    reader
        .records()
        .map(|r| {
            r.expect("Failed to read row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Value of the cell in `row` under the header `label`.
#[allow(dead_code)] // Used by other test files
pub fn cell<'a>(grid: &'a [Vec<String>], row: usize, label: &str) -> &'a str {
    let column = grid[0]
        .iter()
        .position(|h| h == label)
        .unwrap_or_else(|| panic!("column '{}' not found", label));
    grid[row].get(column).map(String::as_str).unwrap_or("")
}

/// Serves `html` at `path`: one HEAD answered 200 and one GET with the page.
#[allow(dead_code)] // Used by other test files
pub fn serve_page(server: &Server, path: &'static str, html: &'static str) {
    server.expect(
        Expectation::matching(request::method_path("HEAD", path)).respond_with(status_code(200)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", path))
            .respond_with(status_code(200).body(html)),
    );
}

/// Serves `body` as robots.txt for every lookup.
#[allow(dead_code)] // Used by other test files
pub fn serve_robots(server: &Server, body: &'static str) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/robots.txt"))
            .times(..)
            .respond_with(status_code(200).body(body)),
    );
}
