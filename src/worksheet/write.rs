//! Writing check results back into the worksheet.

use log::{error, info};

use crate::models::{CheckResult, IndexStatus, IndexingDirectives, PageSignals};
use crate::utils::sanitize::sanitize_and_truncate_cell_text;

use super::labels::{presence_text, result_columns, yes_no, CHECK_FAILED, COLUMN_URL, NO};
use super::Worksheet;

/// One changed cell, addressed in A1 notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// Cell coordinate, e.g. `D2`
    pub cell: String,
    pub value: String,
}

/// Converts a 0-based column index into spreadsheet letters (`0` is `A`,
/// `26` is `AA`).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Writes results into the worksheet and returns the cells that changed.
///
/// Missing result columns are appended to the header row. Each result is
/// written to the row it was read from; results without a data source row
/// are ignored. Cells whose rendered value equals the current content are left
/// alone.
pub fn update_worksheet_with_results(
    sheet: &mut Worksheet,
    results: &[CheckResult],
) -> Vec<CellUpdate> {
    let Some(headers) = sheet.values.first_mut() else {
        error!("Cannot write results: the worksheet is empty");
        return Vec::new();
    };
    if !headers.iter().any(|h| h.trim() == COLUMN_URL) {
        error!("Cannot write results: column '{}' not found", COLUMN_URL);
        return Vec::new();
    }

    let mut updates = Vec::new();
    let mut column_indices = Vec::new();
    for label in result_columns() {
        let index = match headers.iter().position(|h| h.trim() == label) {
            Some(index) => index,
            None => {
                headers.push(label.clone());
                let index = headers.len() - 1;
                updates.push(CellUpdate {
                    cell: format!("{}1", column_letter(index)),
                    value: label,
                });
                index
            }
        };
        column_indices.push(index);
    }

    for result in results {
        let Some(sheet_row) = result.request.source_row.filter(|row| *row > 1) else {
            continue;
        };
        let row_index = sheet_row - 1;
        if sheet.values.len() <= row_index {
            sheet.values.resize(row_index + 1, Vec::new());
        }
        let row = &mut sheet.values[row_index];

        for (column, value) in column_indices.iter().zip(render_result(result)) {
            let value = sanitize_and_truncate_cell_text(&value);
            if row.get(*column).map(String::as_str).unwrap_or("") == value {
                continue;
            }
            if row.len() <= *column {
                row.resize(*column + 1, String::new());
            }
            row[*column] = value.clone();
            updates.push(CellUpdate {
                cell: format!("{}{}", column_letter(*column), sheet_row),
                value,
            });
        }
    }

    info!("📝 {} cell(s) updated", updates.len());
    updates
}

/// Renders one result in the order of [`result_columns`].
fn render_result(result: &CheckResult) -> Vec<String> {
    let resolution = &result.resolution;
    let signals = result.signals.as_ref();

    let chain = resolution
        .redirect_chain
        .iter()
        .map(|hop| format!("{} ({})", hop.url, hop.status_code))
        .collect::<Vec<_>>()
        .join(" → ");

    let mut cells = vec![
        resolution.initial_status_code.to_string(),
        chain,
        resolution.final_url.clone(),
        resolution.final_status_code.to_string(),
        yes_no(resolution.ssl_fallback_used).to_string(),
        signals.map(render_robots).unwrap_or_default(),
        signals
            .and_then(|s| s.indexing_directives)
            .map(render_directives)
            .unwrap_or_default(),
        signals.map(render_canonical).unwrap_or_default(),
    ];

    for check in result.link_checks() {
        cells.push(presence_text(check.found).to_string());
        cells.push(presence_text(check.anchor_matches).to_string());
        cells.push(check.rel_attribute.unwrap_or_default());
    }

    cells.push(result.seo_check_error().unwrap_or_default().to_string());
    cells.push(result.link_check_error().unwrap_or_default().to_string());
    cells.push(
        result
            .indexing
            .as_ref()
            .map(|v| match v.status {
                IndexStatus::Indexed => yes_no(true),
                IndexStatus::NotIndexed => yes_no(false),
                IndexStatus::CheckFailed => CHECK_FAILED,
            })
            .unwrap_or_default()
            .to_string(),
    );
    cells.push(
        result
            .indexing
            .as_ref()
            .map(|v| v.search_query.clone())
            .unwrap_or_default(),
    );
    cells.push(resolution.request_error.clone().unwrap_or_default());
    cells
}

fn render_robots(signals: &PageSignals) -> String {
    let verdict = |allowed: Option<bool>| allowed.map(yes_no).unwrap_or_default();
    format!(
        "*: {} | Googlebot: {}",
        verdict(signals.robots_allowed_for_star),
        verdict(signals.robots_allowed_for_googlebot)
    )
}

fn render_directives(directives: IndexingDirectives) -> String {
    let flags = format!(
        "{}, {}",
        if directives.noindex { "noindex" } else { "index" },
        if directives.nofollow { "nofollow" } else { "follow" }
    );
    match directives.source {
        Some(source) => format!("{}: {}", source.as_str(), flags),
        None => flags,
    }
}

fn render_canonical(signals: &PageSignals) -> String {
    signals
        .canonical_url
        .clone()
        .unwrap_or_else(|| NO.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CheckRequest, DirectiveSource, ExpectedLink, IndexingVerdict, LinkCheckResult, Presence,
        RedirectHop, ResolutionOutcome,
    };

    fn sheet(rows: &[&[&str]]) -> Worksheet {
        Worksheet::new(
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn ok_result(row: usize) -> CheckResult {
        CheckResult {
            request: CheckRequest::new(
                "http://blog.example/a",
                vec![
                    ExpectedLink::new(Some("sofa"), Some("https://shop.example/sofa")),
                    ExpectedLink::default(),
                    ExpectedLink::default(),
                ],
            )
            .with_source_row(row),
            resolution: ResolutionOutcome {
                initial_status_code: 301,
                redirect_chain: vec![RedirectHop {
                    url: "http://blog.example/a".to_string(),
                    status_code: 301,
                }],
                final_url: "https://blog.example/a".to_string(),
                final_status_code: 200,
                ssl_fallback_used: false,
                request_error: None,
                error_type: None,
            },
            content_error: None,
            signals: Some(PageSignals {
                robots_allowed_for_star: Some(true),
                robots_allowed_for_googlebot: Some(false),
                indexing_directives: Some(IndexingDirectives {
                    noindex: true,
                    nofollow: false,
                    source: Some(DirectiveSource::MetaRobots),
                }),
                canonical_url: None,
                link_checks: vec![
                    LinkCheckResult {
                        found: Presence::Yes,
                        anchor_matches: Presence::Yes,
                        rel_attribute: Some("nofollow".to_string()),
                    },
                    LinkCheckResult::default(),
                    LinkCheckResult::default(),
                ],
                seo_check_error: None,
                link_check_error: None,
            }),
            indexing: Some(IndexingVerdict {
                status: IndexStatus::CheckFailed,
                search_query: "site:blog.example/a".to_string(),
            }),
        }
    }

    fn cell<'a>(sheet: &'a Worksheet, row: usize, label: &str) -> &'a str {
        let column = sheet.values()[0]
            .iter()
            .position(|h| h == label)
            .expect("column exists");
        sheet.values()[row]
            .get(column)
            .map(String::as_str)
            .unwrap_or("")
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(3), "D");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_results_are_rendered_into_new_columns() {
        let mut ws = sheet(&[
            &["Анкор-1", "Урл-1", "Url"],
            &["sofa", "https://shop.example/sofa", "http://blog.example/a"],
        ]);
        let updates = update_worksheet_with_results(&mut ws, &[ok_result(2)]);

        assert_eq!(ws.values()[0].len(), 3 + result_columns().len());
        assert!(updates.contains(&CellUpdate {
            cell: "D1".to_string(),
            value: "Status Code".to_string(),
        }));
        assert!(updates.contains(&CellUpdate {
            cell: "D2".to_string(),
            value: "301".to_string(),
        }));
        assert_eq!(
            cell(&ws, 1, "Redirect Chain"),
            "http://blog.example/a (301)"
        );
        assert_eq!(cell(&ws, 1, "Final Status Code"), "200");
        assert_eq!(cell(&ws, 1, "SSL Disabled"), "Ні");
        assert_eq!(cell(&ws, 1, "Robots.txt"), "*: Так | Googlebot: Ні");
        assert_eq!(
            cell(&ws, 1, "Meta Robots/X-Robots-Tag"),
            "Meta Robots: noindex, follow"
        );
        assert_eq!(cell(&ws, 1, "Canonical"), "Ні");
        assert_eq!(cell(&ws, 1, "Урл-1 наявність"), "Так");
        assert_eq!(cell(&ws, 1, "Анкор-1 співпадає"), "Так");
        assert_eq!(cell(&ws, 1, "Урл-1 rel"), "nofollow");
        assert_eq!(cell(&ws, 1, "Урл-2 наявність"), "Н/Д");
        assert_eq!(cell(&ws, 1, "Google Indexing"), "Помилка");
        assert_eq!(cell(&ws, 1, "Search Query"), "site:blog.example/a");
    }

    #[test]
    fn test_unchanged_cells_produce_no_updates() {
        let mut ws = sheet(&[
            &["Анкор-1", "Урл-1", "Url"],
            &["sofa", "https://shop.example/sofa", "http://blog.example/a"],
        ]);
        update_worksheet_with_results(&mut ws, &[ok_result(2)]);
        let second = update_worksheet_with_results(&mut ws, &[ok_result(2)]);
        assert!(second.is_empty());
    }

    #[test]
    fn test_existing_columns_are_updated_in_place() {
        let mut ws = sheet(&[
            &["Анкор-1", "Урл-1", "Url", "Status Code", "Note"],
            &["sofa", "https://shop.example/sofa", "http://blog.example/a", "404", "keep"],
        ]);
        let updates = update_worksheet_with_results(&mut ws, &[ok_result(2)]);
        assert!(updates.contains(&CellUpdate {
            cell: "D2".to_string(),
            value: "301".to_string(),
        }));
        assert!(!updates.iter().any(|u| u.cell == "D1"));
        assert_eq!(cell(&ws, 1, "Note"), "keep");
    }

    #[test]
    fn test_missing_url_column_writes_nothing() {
        let mut ws = sheet(&[&["Анкор-1", "Урл-1"], &["a", "u"]]);
        assert!(update_worksheet_with_results(&mut ws, &[ok_result(2)]).is_empty());
        assert_eq!(ws.values()[0].len(), 2);

        let mut empty = Worksheet::new(Vec::new());
        assert!(update_worksheet_with_results(&mut empty, &[ok_result(2)]).is_empty());
    }
}
