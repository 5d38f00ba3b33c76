//! Tests for the main report parser functionality

use super::*;
use crate::app::models::{Booklet, SubjectCode, derive_net};
use crate::app::services::report_parser::delimiter::Delimiter;
use crate::app::services::report_parser::parse_report;
use crate::app::services::report_parser::parser::report_lines;
use crate::constants::messages;

#[test]
fn test_direct_net_value_is_used() {
    let text = tab_report(&[
        &["OgrenciNo", "AdSoyad", "Dogru", "Yanlis", "Net"],
        &["123", "MEHMET YILMAZ", "30", "10", "26.67"],
    ]);

    let outcome = parse_report(&text);

    assert_eq!(outcome.students.len(), 1);
    let student = &outcome.students[0];
    assert_eq!(student.student_number, "123");
    assert_eq!(student.full_name, "MEHMET YILMAZ");
    assert_eq!(student.correct, 30.0);
    assert_eq!(student.wrong, 10.0);
    assert_close(student.net, 26.67);
    assert!(student.is_valid);
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.delimiter, Some(Delimiter::Tab));
}

#[test]
fn test_net_is_derived_without_net_column() {
    let text = tab_report(&[
        &["OgrenciNo", "AdSoyad", "Dogru", "Yanlis"],
        &["456", "AYSE KAYA", "20", "15"],
    ]);

    let outcome = parse_report(&text);
    let student = &outcome.students[0];

    assert_eq!(student.student_number, "456");
    assert_close(student.net, 15.0);
    assert!(student.is_valid);
}

#[test]
fn test_per_subject_direct_net() {
    let text = tab_report(&[
        &["OgrenciNo", "AdSoyad", "mat_dogru", "mat_net"],
        &["789", "Ali Veli", "8", "7.33"],
    ]);

    let outcome = parse_report(&text);
    let student = &outcome.students[0];

    assert_eq!(outcome.subjects, vec![SubjectCode::Math]);
    assert_eq!(student.lessons.len(), 1);

    let math = student.lesson(SubjectCode::Math).unwrap();
    assert_eq!(math.name, "Matematik");
    assert_eq!(math.correct, 8.0);
    assert_eq!(math.wrong, 0.0);
    assert_close(math.net, 7.33);
}

#[test]
fn test_header_only_input_is_rejected() {
    let outcome = parse_report("OgrenciNo\tAdSoyad\tNet\n\n   \n");

    assert!(outcome.students.is_empty());
    assert_eq!(outcome.summary.total, 0);
    assert_eq!(outcome.warnings, vec![messages::INSUFFICIENT_LINES.to_string()]);
    assert!(outcome.headers.is_empty());
    assert_eq!(outcome.delimiter, None);
}

#[test]
fn test_empty_input_is_rejected() {
    let outcome = parse_report("");
    assert!(outcome.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_missing_student_number_row_is_kept() {
    let text = tab_report(&[
        &["OgrenciNo", "AdSoyad", "Net"],
        &["101", "A", "10"],
        &["", "B", "12"],
        &["103", "C", "14"],
    ]);

    let outcome = parse_report(&text);

    assert_eq!(outcome.students.len(), 3);
    let student = &outcome.students[1];
    assert_eq!(student.line_number, 3);
    assert_eq!(student.student_number, "");
    assert_eq!(student.full_name, "B");
    assert_eq!(
        student.errors,
        vec![messages::STUDENT_NUMBER_MISSING.to_string()]
    );
    assert!(!student.is_valid);

    assert_eq!(outcome.summary.total, 3);
    assert_eq!(outcome.summary.success_count, 2);
    assert_eq!(outcome.summary.error_count, 1);
}

#[test]
fn test_parsing_is_deterministic() {
    let text = create_full_report();
    assert_eq!(parse_report(&text), parse_report(&text));
}

#[test]
fn test_line_numbers_follow_source_order() {
    let text = tab_report(&[
        &["No", "Ad", "Net"],
        &["1", "A", "1"],
        &["2", "B", "2"],
        &["3", "C", "3"],
        &["4", "D", "4"],
    ]);

    let outcome = parse_report(&text);

    for (offset, student) in outcome.students.iter().enumerate() {
        let data_line = offset + 1;
        assert_eq!(student.line_number, data_line + 1);
        assert_eq!(student.student_number, data_line.to_string());
    }
}

#[test]
fn test_invalid_rows_are_never_dropped() {
    let text = "No;Ad;Net\n;;\nxx;;\n;;5\n7;;";
    let lines = report_lines(text);
    let outcome = parse_report(text);

    assert_eq!(outcome.students.len(), lines.len() - 1);
    assert_eq!(outcome.summary.total, lines.len() - 1);
    assert_eq!(
        outcome.summary.success_count + outcome.summary.error_count,
        outcome.summary.total
    );
}

#[test]
fn test_net_fallback_at_both_levels() {
    let text = tab_report(&[
        &["No", "Ad", "Dogru", "Yanlis", "Net", "Fen D", "Fen Y", "Fen Net"],
        &["1", "A", "20", "6", "-", "10", "3", ""],
        &["2", "B", "x", "9", "abc", "", "4", "?"],
        &["3", "C", "12", "", "11,5", "5", "", "4,75"],
    ]);

    let outcome = parse_report(&text);

    let first = student_at(&outcome, 2);
    assert_close(first.net, derive_net(20.0, 6.0));
    assert_close(first.lesson(SubjectCode::Science).unwrap().net, derive_net(10.0, 3.0));

    let second = student_at(&outcome, 3);
    assert_eq!(second.correct, 0.0);
    assert_close(second.net, derive_net(0.0, 9.0));
    let science = second.lesson(SubjectCode::Science).unwrap();
    assert_eq!(science.correct, 0.0);
    assert_close(science.net, derive_net(0.0, 4.0));

    let third = student_at(&outcome, 4);
    assert_close(third.net, 11.5);
    assert_close(third.lesson(SubjectCode::Science).unwrap().net, 4.75);
}

#[test]
fn test_student_number_cleanup_in_rows() {
    let text = tab_report(&[
        &["OgrenciNo", "AdSoyad", "Net"],
        &["00123-A", "X", "1"],
        &["----", "Y", "2"],
    ]);

    let outcome = parse_report(&text);

    assert_eq!(outcome.students[0].student_number, "00123");
    assert!(outcome.students[0].is_valid);

    // Fallback keeps the raw value, which is non-empty, so no error
    assert_eq!(outcome.students[1].student_number, "----");
    assert!(outcome.students[1].errors.is_empty());
    assert!(outcome.students[1].is_valid);
}

#[test]
fn test_validity_requires_no_errors_and_a_number() {
    let text = tab_report(&[&["No", "Ad"], &["5", "A"], &["", "B"]]);
    let outcome = parse_report(&text);

    let valid = &outcome.students[0];
    assert!(valid.errors.is_empty() && !valid.student_number.is_empty());
    assert!(valid.is_valid);

    let invalid = &outcome.students[1];
    assert!(!invalid.errors.is_empty());
    assert!(!invalid.is_valid);

    assert_eq!(outcome.valid_students().count(), 1);
    assert_eq!(outcome.invalid_students().count(), 1);
}

#[test]
fn test_unmapped_student_number_uses_first_column() {
    let text = "Kod;Ad Soyad;Net\n9-001;ayşe;40\n";
    let outcome = parse_report(text);

    assert!(
        outcome
            .warnings
            .contains(&messages::MISSING_STUDENT_NUMBER_COLUMN.to_string())
    );
    assert_eq!(outcome.students[0].student_number, "9001");
    assert_eq!(outcome.students[0].full_name, "AYŞE");
}

#[test]
fn test_full_optical_report() {
    let outcome = parse_report(&create_full_report());

    assert_eq!(outcome.summary.total, 3);
    assert_eq!(outcome.summary.success_count, 2);
    assert_eq!(outcome.subjects, vec![SubjectCode::Turkish, SubjectCode::Math]);
    assert_eq!(outcome.headers[0], "ogrenci_no");
    assert_eq!(outcome.headers.len(), 18);
    assert!(outcome.warnings.is_empty());

    let first = student_at(&outcome, 2);
    assert_eq!(first.full_name, "AYŞE YILMAZ");
    assert_eq!(first.class_code.as_deref(), Some("8-A"));
    assert_eq!(first.booklet, Some(Booklet::A));
    assert_eq!((first.correct, first.wrong, first.blank), (33.0, 5.0, 2.0));
    assert_close(first.net, 31.33);
    assert_eq!(first.score, Some(412.5));
    assert_eq!(first.normalized_score, Some(430.1));
    assert_eq!(first.overall_rank, Some(3.0));
    assert_eq!(first.class_rank, Some(1.0));

    let turkish = first.lesson(SubjectCode::Turkish).unwrap();
    assert_eq!((turkish.correct, turkish.wrong), (18.0, 2.0));
    assert_close(turkish.net, 17.33);

    let second = student_at(&outcome, 3);
    assert_eq!(second.full_name, "ALİ IŞIK");
    // Missing official score falls back to the raw score
    assert_eq!(second.normalized_score, Some(350.0));

    let third = student_at(&outcome, 4);
    assert!(!third.is_valid);
    assert_eq!(third.booklet, None);
    assert_eq!(third.full_name, "");
    assert_eq!(third.score, None);
    assert_eq!(third.normalized_score, None);
    assert_eq!(third.overall_rank, None);
    assert_close(third.net, 0.0);
    assert_eq!(third.lessons.len(), 2);
}

#[test]
fn test_windows_line_endings_and_bom() {
    let text = "\u{feff}No,Ad,Net\r\n1,a,2,5\r\n\r\n2,b,3\r\n";
    let outcome = parse_report(text);

    assert_eq!(outcome.delimiter, Some(Delimiter::Comma));
    assert_eq!(outcome.headers, vec!["no", "ad", "net"]);
    assert_eq!(outcome.students.len(), 2);
    // Decimal comma under comma delimiter splits the value: a known limitation
    assert_close(outcome.students[0].net, 2.0);
    assert_eq!(outcome.students[1].line_number, 3);
}

#[test]
fn test_whitespace_aligned_report() {
    let text = "\
NO     AD SOYAD          DOGRU   YANLIS   NET
12     ZEYNEP DEMIR      25      5        23,33
13     CAN OZ            10      12       6";

    let outcome = parse_report(text);

    assert_eq!(outcome.delimiter, Some(Delimiter::Whitespace));
    assert_eq!(outcome.headers, vec!["no", "ad_soyad", "dogru", "yanlis", "net"]);
    assert_eq!(outcome.students[0].full_name, "ZEYNEP DEMIR");
    assert_close(outcome.students[0].net, 23.33);
    assert_eq!(outcome.students[1].wrong, 12.0);
}

#[test]
fn test_fractional_and_negative_counts_drive_derived_net() {
    let text = tab_report(&[
        &["OgrenciNo", "AdSoyad", "Dogru", "Yanlis", "Mat D", "Mat Y"],
        &["1", "A", "12,5", "3", "7,5", "1,5"],
        &["2", "B", "10", "-3", "4", "-6"],
    ]);

    let outcome = parse_report(&text);

    let first = student_at(&outcome, 2);
    assert_eq!(first.correct, 12.5);
    assert_close(first.net, 11.5);
    let math = first.lesson(SubjectCode::Math).unwrap();
    assert_eq!((math.correct, math.wrong), (7.5, 1.5));
    assert_close(math.net, 7.0);

    let second = student_at(&outcome, 3);
    assert_eq!(second.wrong, -3.0);
    assert_close(second.net, 11.0);
    assert_close(second.lesson(SubjectCode::Math).unwrap().net, 6.0);
}

#[test]
fn test_short_rows_default_missing_cells() {
    let text = tab_report(&[&["No", "Ad", "Dogru", "Yanlis", "Net"], &["55"]]);
    let outcome = parse_report(&text);

    let student = &outcome.students[0];
    assert!(student.is_valid);
    assert_eq!(student.full_name, "");
    assert_eq!(student.correct, 0.0);
    assert_close(student.net, 0.0);
}
