//! Individual row extraction for report files
//!
//! This module turns one split data line into a [`StudentResult`]. Scores
//! are taken as supplied, fractions and signs included; the only derivation
//! is the net-score fallback applied when a net column is missing or
//! unreadable.

use tracing::debug;

use super::column_mapping::{ColumnRole, ColumnRoleMap, SubjectColumns};
use super::field_parsers::{
    cell, clean_full_name, extract_student_number, number_at, optional_cell, parse_booklet,
};
use crate::app::models::{FieldKind, LessonResult, StudentResult, SubjectCode, derive_net};
use crate::constants::messages;

/// Parse a single data row into a student record
///
/// `line_number` is 1-based with the header on line 1. The record is always
/// returned; problems land in its error list.
pub fn parse_student_row(
    fields: &[&str],
    mapping: &ColumnRoleMap,
    line_number: usize,
) -> StudentResult {
    let mut errors = Vec::new();

    // Unmapped student number falls back to the first column
    let number_column = mapping.get(ColumnRole::StudentNumber).unwrap_or(0);
    let student_number = extract_student_number(cell(fields, number_column));
    if student_number.is_empty() {
        errors.push(messages::STUDENT_NUMBER_MISSING.to_string());
    }

    let full_name = mapping
        .get(ColumnRole::FullName)
        .map(|index| clean_full_name(cell(fields, index)))
        .unwrap_or_default();

    let class_code =
        optional_cell(fields, mapping.get(ColumnRole::ClassCode)).map(str::to_string);
    let booklet = optional_cell(fields, mapping.get(ColumnRole::Booklet)).and_then(parse_booklet);

    let correct = number_at(fields, mapping.get(ColumnRole::Correct)).unwrap_or(0.0);
    let wrong = number_at(fields, mapping.get(ColumnRole::Wrong)).unwrap_or(0.0);
    let blank = number_at(fields, mapping.get(ColumnRole::Blank)).unwrap_or(0.0);
    let net = number_at(fields, mapping.get(ColumnRole::Net))
        .unwrap_or_else(|| derive_net(correct, wrong));

    let score = number_at(fields, mapping.get(ColumnRole::RawScore));
    let normalized_score = number_at(fields, mapping.get(ColumnRole::NormalizedScore)).or(score);

    let overall_rank = number_at(fields, mapping.get(ColumnRole::OverallRank));
    let class_rank = number_at(fields, mapping.get(ColumnRole::ClassRank));

    let lessons = mapping
        .subjects()
        .map(|(subject, columns)| parse_lesson(fields, subject, columns))
        .collect();

    let mut result = StudentResult {
        student_number,
        full_name,
        class_code,
        booklet,
        correct,
        wrong,
        blank,
        net,
        score,
        normalized_score,
        lessons,
        overall_rank,
        class_rank,
        line_number,
        errors,
        is_valid: false,
    };
    result.refresh_validity();

    if !result.is_valid {
        debug!("Line {}: {:?}", line_number, result.errors);
    }

    result
}

/// Build one subject's result from its mapped columns
pub fn parse_lesson(fields: &[&str], subject: SubjectCode, columns: &SubjectColumns) -> LessonResult {
    let correct = number_at(fields, columns.get(FieldKind::Correct)).unwrap_or(0.0);
    let wrong = number_at(fields, columns.get(FieldKind::Wrong)).unwrap_or(0.0);
    let blank = number_at(fields, columns.get(FieldKind::Blank)).unwrap_or(0.0);
    let net = number_at(fields, columns.get(FieldKind::Net))
        .unwrap_or_else(|| derive_net(correct, wrong));

    LessonResult {
        subject,
        name: subject.display_name().to_string(),
        correct,
        wrong,
        blank,
        net,
    }
}
