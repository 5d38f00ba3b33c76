//! Field parsing utilities for report rows
//!
//! This module provides the tolerant cell parsers used during row
//! extraction. None of them fail: unusable input resolves to `None` (or a
//! documented fallback) and the caller applies the field's default.

use crate::app::models::Booklet;

/// Get a trimmed cell by index, or an empty string past the end of the row
pub fn cell<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).map(|s| s.trim()).unwrap_or("")
}

/// Get a trimmed, non-empty cell for an optional column
pub fn optional_cell<'a>(fields: &[&'a str], index: Option<usize>) -> Option<&'a str> {
    index.map(|i| cell(fields, i)).filter(|s| !s.is_empty())
}

/// Parse a locale-tolerant decimal number
///
/// Whitespace is stripped and a comma is read as the decimal separator.
/// Empty cells, a lone dash and anything that is not a finite number yield
/// `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || compact == "-" {
        return None;
    }

    compact
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse an optional numeric column of a row
pub fn number_at(fields: &[&str], index: Option<usize>) -> Option<f64> {
    index.and_then(|i| parse_number(cell(fields, i)))
}

/// Extract the student number from a raw cell
///
/// Keeps only the digits ("00123-A" becomes "00123"). When the cell holds
/// no digits at all the trimmed cell is returned unchanged, which may be
/// empty.
pub fn extract_student_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        raw.trim().to_string()
    } else {
        digits
    }
}

/// Uppercase text with Turkish casing rules
///
/// Dotted `i` becomes `İ` and dotless `ı` becomes `I`; every other letter
/// follows the default Unicode mapping.
pub fn to_turkish_uppercase(text: &str) -> String {
    let mut upper = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'i' => upper.push('İ'),
            'ı' => upper.push('I'),
            other => upper.extend(other.to_uppercase()),
        }
    }
    upper
}

/// Clean a raw name cell for display
///
/// Drops a leading run of digits and whitespace (sequence numbers some
/// readers prepend), collapses internal whitespace and uppercases with
/// Turkish rules.
pub fn clean_full_name(raw: &str) -> String {
    let without_prefix = raw.trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace());
    let collapsed = without_prefix.split_whitespace().collect::<Vec<_>>().join(" ");
    to_turkish_uppercase(&collapsed)
}

/// Parse a booklet cell; unknown letters are treated as absent
pub fn parse_booklet(raw: &str) -> Option<Booklet> {
    Booklet::from_letter(&to_turkish_uppercase(raw.trim()))
}
