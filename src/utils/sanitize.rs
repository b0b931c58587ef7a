//! Sanitizing text before it is written into worksheet cells.

use crate::config::MAX_CELL_TEXT_CHARS;

/// Removes control characters other than tab, newline and carriage return.
pub fn sanitize_cell_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Sanitizes a value and truncates it to what a spreadsheet cell holds.
///
/// Truncation counts characters, not bytes, so multi-byte text is never cut
/// mid-character.
pub fn sanitize_and_truncate_cell_text(text: &str) -> String {
    let sanitized = sanitize_cell_text(text);
    let length = sanitized.chars().count();
    if length <= MAX_CELL_TEXT_CHARS {
        return sanitized;
    }
    let kept: String = sanitized
        .chars()
        .take(MAX_CELL_TEXT_CHARS.saturating_sub(60))
        .collect();
    format!("{}... (truncated, original length: {} chars)", kept, length)
}
