//! Format classification for uploaded result files
//!
//! Decides whether a file is a pre-computed result report (a table with
//! correct/wrong/net/score columns) or a raw optical dump of answer marks
//! that still needs scoring. Only the first lines are sampled and the
//! decision is a pure function of the text.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::app::models::{FormatClassification, FormatKind};
use crate::app::services::report_parser::column_mapping::{ColumnRole, match_subject_column};
use crate::app::services::report_parser::delimiter::Delimiter;
use crate::app::services::report_parser::header::normalize_headers;
use crate::app::services::report_parser::parser::report_lines;
use crate::constants::{CLASSIFIER_SAMPLE_LINES, OPTICAL_MIN_MARK_RUN};

/// Run of answer marks: booklet letters, spaces for blanks and `*` for
/// multiple marks
static MARK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[A-E* ]{{{OPTICAL_MIN_MARK_RUN},}}"))
        .expect("mark run pattern is valid")
});

/// Roles that carry result values rather than identity
const RESULT_ROLES: [ColumnRole; 6] = [
    ColumnRole::Correct,
    ColumnRole::Wrong,
    ColumnRole::Blank,
    ColumnRole::Net,
    ColumnRole::RawScore,
    ColumnRole::NormalizedScore,
];

/// Sampled mark lines may differ in length by at most this fraction
const LENGTH_TOLERANCE: f64 = 0.1;

/// Classify report text by layout
pub fn classify_format(text: &str) -> FormatClassification {
    let lines = report_lines(text);
    let Some(header_line) = lines.first() else {
        return FormatClassification::new(FormatKind::Unknown, "empty input", 0.0);
    };

    let result_columns = count_result_columns(header_line);
    debug!("Header carries {} result columns", result_columns);

    match result_columns {
        0 => {}
        1 => {
            return FormatClassification::new(
                FormatKind::Report,
                "one result column in header",
                0.55,
            );
        }
        n => {
            let confidence = (0.6 + 0.1 * (n - 2) as f64).min(0.99);
            return FormatClassification::new(
                FormatKind::Report,
                format!("{n} result columns in header"),
                confidence,
            );
        }
    }

    let sample: Vec<&str> = lines.iter().take(CLASSIFIER_SAMPLE_LINES).copied().collect();
    if let Some(fraction) = optical_mark_fraction(&sample) {
        return FormatClassification::new(
            FormatKind::RawOptical,
            format!("{:.0}% of sampled lines are answer-mark strings", fraction * 100.0),
            fraction * 0.95,
        );
    }

    FormatClassification::new(FormatKind::Unknown, "no recognized result columns", 0.0)
}

/// Count header columns naming aggregate or per-subject result values
fn count_result_columns(header_line: &str) -> usize {
    let delimiter = Delimiter::detect(header_line);
    let tokens = normalize_headers(&delimiter.split(header_line));

    tokens
        .iter()
        .filter(|token| {
            RESULT_ROLES.iter().any(|role| role.matches(token))
                || match_subject_column(token).is_some()
        })
        .count()
}

/// Fraction of sampled lines that look like fixed-width mark strings
///
/// Returns `None` when the sample carries delimiters, when line lengths
/// vary too much, or when fewer than half the lines contain a mark run.
fn optical_mark_fraction(sample: &[&str]) -> Option<f64> {
    if sample.iter().any(|line| line.contains(['\t', ';', ','])) {
        return None;
    }

    let lengths: Vec<usize> = sample.iter().map(|line| line.chars().count()).collect();
    let longest = *lengths.iter().max()?;
    let shortest = *lengths.iter().min()?;
    if (longest - shortest) as f64 > longest as f64 * LENGTH_TOLERANCE {
        return None;
    }

    let mark_lines = sample.iter().filter(|line| MARK_RUN.is_match(line)).count();
    let fraction = mark_lines as f64 / sample.len() as f64;
    (fraction >= 0.5).then_some(fraction)
}
