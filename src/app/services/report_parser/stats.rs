//! Parse summary and outcome structures for report import
//!
//! This module provides the aggregate result of one parse call: the
//! extracted student records in source order, the success/failure tally,
//! file-level warnings and the header diagnostics.

use serde::{Deserialize, Serialize};

use super::delimiter::Delimiter;
use crate::app::models::{StudentResult, SubjectCode};

/// Row tally for one parse call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    /// Number of data lines (header excluded)
    pub total: usize,

    /// Rows that produced a valid record
    pub success_count: usize,

    /// Rows that produced an invalid record
    pub error_count: usize,
}

impl ParseSummary {
    /// Create new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one processed row
    pub fn record(&mut self, is_valid: bool) {
        self.total += 1;
        if is_valid {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success_count as f64 / self.total as f64) * 100.0
        }
    }

    /// Check if every row parsed into a valid record
    pub fn is_successful(&self) -> bool {
        self.total > 0 && self.error_count == 0
    }
}

/// Result of parsing one report file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// One record per data line, in source order; invalid rows included
    pub students: Vec<StudentResult>,

    pub summary: ParseSummary,

    /// File-level diagnostics
    pub warnings: Vec<String>,

    /// Normalized header tokens, in column order
    pub headers: Vec<String>,

    /// Delimiter detected on the header line
    pub delimiter: Option<Delimiter>,

    /// Subjects with at least one recognized column
    pub subjects: Vec<SubjectCode>,
}

impl ParseOutcome {
    /// Empty outcome carrying a single warning
    pub fn rejected(warning: impl Into<String>) -> Self {
        Self {
            students: Vec::new(),
            summary: ParseSummary::new(),
            warnings: vec![warning.into()],
            headers: Vec::new(),
            delimiter: None,
            subjects: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn valid_students(&self) -> impl Iterator<Item = &StudentResult> {
        self.students.iter().filter(|student| student.is_valid)
    }

    pub fn invalid_students(&self) -> impl Iterator<Item = &StudentResult> {
        self.students.iter().filter(|student| !student.is_valid)
    }
}
