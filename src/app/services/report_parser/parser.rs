//! Core report parser implementation
//!
//! This module provides the parse orchestration: line splitting, delimiter
//! detection, header mapping and per-row extraction. Parsing is a pure
//! function of the input text and never fails; data problems are reported
//! through the outcome's warnings and per-record errors.

use tracing::{debug, info, warn};

use super::column_mapping::ColumnRoleMap;
use super::delimiter::Delimiter;
use super::header::normalize_headers;
use super::record_parser::parse_student_row;
use super::stats::{ParseOutcome, ParseSummary};
use crate::constants::{MIN_REPORT_LINES, messages};

/// Parse report text into per-student results
///
/// The first non-blank line is the header; every following non-blank line
/// yields exactly one record, valid or not, in source order.
pub fn parse_report(text: &str) -> ParseOutcome {
    let lines = report_lines(text);

    if lines.len() < MIN_REPORT_LINES {
        warn!("{} (found {} lines)", messages::INSUFFICIENT_LINES, lines.len());
        return ParseOutcome::rejected(messages::INSUFFICIENT_LINES);
    }

    let header_line = lines[0];
    let delimiter = Delimiter::detect(header_line);
    let headers = normalize_headers(&delimiter.split(header_line));
    debug!("Detected {} delimiter, headers: {:?}", delimiter, headers);

    let mapping = ColumnRoleMap::analyze(&headers);
    let (mapped_roles, subject_count) = mapping.stats();
    debug!(
        "Column mapping: {} columns, {} roles, {} subjects",
        headers.len(),
        mapped_roles,
        subject_count
    );

    let warnings = mapping.warnings();
    for warning in &warnings {
        warn!("{}", warning);
    }

    let mut summary = ParseSummary::new();
    let mut students = Vec::with_capacity(lines.len() - 1);

    for (index, line) in lines.iter().enumerate().skip(1) {
        let fields = delimiter.split(line);
        let student = parse_student_row(&fields, &mapping, index + 1);
        summary.record(student.is_valid);
        students.push(student);
    }

    info!(
        "Parsed {} rows: {} valid, {} invalid",
        summary.total, summary.success_count, summary.error_count
    );

    ParseOutcome {
        students,
        summary,
        warnings,
        headers,
        delimiter: Some(delimiter),
        subjects: mapping.subjects().map(|(subject, _)| subject).collect(),
    }
}

/// Split text into non-blank lines with trailing whitespace removed
///
/// A leading byte order mark is dropped. Leading whitespace is kept since
/// an empty first cell in a tab-separated row is significant.
pub fn report_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect()
}
