//! Test utilities for report parser testing
//!
//! This module provides sample report contents and helper functions used
//! across the report parser test modules.

use super::stats::ParseOutcome;

mod parser_tests;
mod stats_tests;

/// Helper to build tab-separated report text from rows of cells
pub fn tab_report(rows: &[&[&str]]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Helper to create a complete report as exported by an optical reader
pub fn create_full_report() -> String {
    tab_report(&[
        &[
            "Öğrenci No",
            "Adı Soyadı",
            "Sınıf",
            "Kitapçık",
            "Türkçe D",
            "Türkçe Y",
            "Türkçe Net",
            "Mat D",
            "Mat Y",
            "Mat Net",
            "Doğru",
            "Yanlış",
            "Boş",
            "Net",
            "Puan",
            "LGS Puanı",
            "Genel Sıra",
            "Sınıf Sıra",
        ],
        &[
            "1001", "ayşe yılmaz", "8-A", "a", "18", "2", "17,33", "15", "3", "14", "33", "5",
            "2", "31,33", "412,5", "430,1", "3", "1",
        ],
        &[
            "1002", "ali ışık", "8-B", "B", "16", "4", "14,67", "10", "6", "8", "26", "10", "4",
            "22,67", "350", "", "12", "4",
        ],
        &[
            "", "", "8-A", "X", "-", "", "", "", "", "", "", "", "", "", "", "", "", "",
        ],
    ])
}

/// Helper to look up a student by line number
pub fn student_at(outcome: &ParseOutcome, line_number: usize) -> &crate::StudentResult {
    outcome
        .students
        .iter()
        .find(|student| student.line_number == line_number)
        .unwrap()
}

/// Assert two floats are equal within a small tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
