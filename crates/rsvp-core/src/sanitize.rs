//! Formula-injection guard for values that end up in a spreadsheet.
//!
//! Only the first character after trimming is inspected. Full-width or
//! otherwise look-alike formula prefixes are not neutralized.

use crate::constants::{FORMULA_NEUTRALIZER, FORMULA_TRIGGERS, MAX_TEXT_LEN};
use crate::model::record::RsvpRecord;

/// ## Summary
/// Trims the value, prefixes [`FORMULA_NEUTRALIZER`] if it would be read as a
/// formula, and truncates it to [`MAX_TEXT_LEN`] characters.
///
/// Idempotent: a neutralized value starts with the neutralizer and is left
/// alone on a second pass.
#[must_use]
pub fn sanitize_value(value: &str) -> String {
    let trimmed = value.trim();
    let mut sanitized = String::with_capacity(trimmed.len() + 1);
    if trimmed.starts_with(FORMULA_TRIGGERS) {
        sanitized.push(FORMULA_NEUTRALIZER);
    }
    sanitized.push_str(trimmed);

    if let Some((cut, _)) = sanitized.char_indices().nth(MAX_TEXT_LEN) {
        sanitized.truncate(cut);
        // Truncation may expose trailing whitespace.
        let kept = sanitized.trim_end().len();
        sanitized.truncate(kept);
    }
    sanitized
}

/// ## Summary
/// Sanitizes every free-form string of the record.
#[must_use]
pub fn sanitize_record(record: RsvpRecord) -> RsvpRecord {
    record.map_text(sanitize_value)
}
