//! Worksheet column labels and cell vocabulary.

use crate::models::Presence;

/// Target page column
pub const COLUMN_URL: &str = "Url";
/// Anchor text columns, one per link slot
pub const ANCHOR_COLUMNS: [&str; 3] = ["Анкор-1", "Анкор-2", "Анкор-3"];
/// Expected link URL columns, one per link slot
pub const LINK_URL_COLUMNS: [&str; 3] = ["Урл-1", "Урл-2", "Урл-3"];

/// Columns every worksheet must have, in their required relative order.
pub const MANDATORY_COLUMNS: [&str; 3] = ["Анкор-1", "Урл-1", "Url"];

/// Status of the first HEAD response
pub const COLUMN_STATUS_CODE: &str = "Status Code";
/// Redirect hops as `url (code)` joined by arrows
pub const COLUMN_REDIRECT_CHAIN: &str = "Redirect Chain";
pub const COLUMN_FINAL_URL: &str = "Final Redirect URL";
pub const COLUMN_FINAL_STATUS_CODE: &str = "Final Status Code";
/// Whether certificate verification had to be disabled
pub const COLUMN_SSL_DISABLED: &str = "SSL Disabled";
/// robots.txt verdicts for `*` and Googlebot
pub const COLUMN_ROBOTS: &str = "Robots.txt";
pub const COLUMN_DIRECTIVES: &str = "Meta Robots/X-Robots-Tag";
pub const COLUMN_CANONICAL: &str = "Canonical";
pub const COLUMN_SEO_ERROR: &str = "SEO Error";
pub const COLUMN_LINK_CHECK_ERROR: &str = "Link Check Error";
/// Search index presence
pub const COLUMN_INDEXING: &str = "Google Indexing";
pub const COLUMN_SEARCH_QUERY: &str = "Search Query";
/// Request error or SSL fallback note
pub const COLUMN_ERROR: &str = "Error";

/// Check passed
pub const YES: &str = "Так";
/// Check failed
pub const NO: &str = "Ні";
/// Slot not requested
pub const NOT_APPLICABLE: &str = "Н/Д";
/// Index check could not be carried out
pub const CHECK_FAILED: &str = "Помилка";

/// Label of the "link present" column for a 1-based slot.
pub fn link_found_column(slot: usize) -> String {
    format!("Урл-{} наявність", slot)
}

/// Label of the "anchor matches" column for a 1-based slot.
pub fn anchor_match_column(slot: usize) -> String {
    format!("Анкор-{} співпадає", slot)
}

/// Label of the `rel` column for a 1-based slot.
pub fn link_rel_column(slot: usize) -> String {
    format!("Урл-{} rel", slot)
}

/// Result columns in the order they are appended to a worksheet.
pub fn result_columns() -> Vec<String> {
    let mut columns: Vec<String> = [
        COLUMN_STATUS_CODE,
        COLUMN_REDIRECT_CHAIN,
        COLUMN_FINAL_URL,
        COLUMN_FINAL_STATUS_CODE,
        COLUMN_SSL_DISABLED,
        COLUMN_ROBOTS,
        COLUMN_DIRECTIVES,
        COLUMN_CANONICAL,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();
    for slot in 1..=ANCHOR_COLUMNS.len() {
        columns.push(link_found_column(slot));
        columns.push(anchor_match_column(slot));
        columns.push(link_rel_column(slot));
    }
    columns.extend(
        [
            COLUMN_SEO_ERROR,
            COLUMN_LINK_CHECK_ERROR,
            COLUMN_INDEXING,
            COLUMN_SEARCH_QUERY,
            COLUMN_ERROR,
        ]
        .iter()
        .map(|c| c.to_string()),
    );
    columns
}

/// Cell text for a yes/no answer.
pub fn yes_no(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

/// Cell text for a three-state answer.
pub fn presence_text(presence: Presence) -> &'static str {
    match presence {
        Presence::Yes => YES,
        Presence::No => NO,
        Presence::NotApplicable => NOT_APPLICABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_columns() {
        let columns = result_columns();
        assert_eq!(columns.len(), 8 + 9 + 5);
        assert_eq!(columns[0], "Status Code");
        assert!(columns.contains(&"Урл-2 наявність".to_string()));
        assert!(columns.contains(&"Анкор-3 співпадає".to_string()));
        assert!(columns.contains(&"Урл-1 rel".to_string()));
        assert_eq!(columns.last().map(String::as_str), Some("Error"));
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(presence_text(Presence::Yes), "Так");
        assert_eq!(presence_text(Presence::No), "Ні");
        assert_eq!(presence_text(Presence::NotApplicable), "Н/Д");
        assert_eq!(yes_no(false), "Ні");
    }
}
