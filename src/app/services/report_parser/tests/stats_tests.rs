//! Tests for parse summary and outcome functionality

use super::*;
use crate::app::services::report_parser::parse_report;
use crate::app::services::report_parser::stats::{ParseOutcome, ParseSummary};

#[test]
fn test_summary_record() {
    let mut summary = ParseSummary::new();
    assert_eq!(summary.total, 0);
    assert!(!summary.is_successful());

    summary.record(true);
    summary.record(true);
    summary.record(false);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.error_count, 1);
    assert!(!summary.is_successful());
}

#[test]
fn test_success_rate() {
    let mut summary = ParseSummary::new();
    assert_eq!(summary.success_rate(), 0.0);

    for valid in [true, true, true, false] {
        summary.record(valid);
    }
    assert_eq!(summary.success_rate(), 75.0);

    let mut clean = ParseSummary::new();
    clean.record(true);
    assert!(clean.is_successful());
    assert_eq!(clean.success_rate(), 100.0);
}

#[test]
fn test_rejected_outcome() {
    let outcome = ParseOutcome::rejected("nothing here");

    assert!(outcome.is_empty());
    assert_eq!(outcome.summary, ParseSummary::default());
    assert_eq!(outcome.warnings, vec!["nothing here".to_string()]);
    assert_eq!(outcome.valid_students().count(), 0);
}

#[test]
fn test_outcome_partitions_students() {
    let outcome = parse_report(&create_full_report());

    let valid: Vec<_> = outcome.valid_students().map(|s| s.line_number).collect();
    let invalid: Vec<_> = outcome.invalid_students().map(|s| s.line_number).collect();

    assert_eq!(valid, vec![2, 3]);
    assert_eq!(invalid, vec![4]);
    assert_eq!(valid.len(), outcome.summary.success_count);
    assert_eq!(invalid.len(), outcome.summary.error_count);
}

#[test]
fn test_outcome_serializes_to_json() {
    let outcome = parse_report("No\tAd\tNet\n7\tali\t12,5");
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["summary"]["total"], 1);
    assert_eq!(json["delimiter"], "tab");
    assert_eq!(json["students"][0]["student_number"], "7");
    assert_eq!(json["students"][0]["net"], 12.5);
    assert!(json["students"][0].get("score").is_none());
    assert_eq!(json["subjects"], serde_json::json!([]));
}
