//! Parse command implementation
//!
//! Decodes, classifies and parses every input file concurrently, then
//! prints the results as a human-readable summary, JSON or CSV.

use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use super::shared::{
    FileReport, ImportStats, create_progress_bar, load_file, partition_results,
    run_concurrently, setup_logging,
};
use crate::app::models::StudentResult;
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::cli::input::discover_report_files;
use crate::{Error, Result};

/// Invalid rows listed per file in human output
const MAX_LISTED_INVALID_ROWS: usize = 10;

/// Column headers of the CSV export
const CSV_HEADERS: [&str; 17] = [
    "file",
    "line",
    "student_number",
    "full_name",
    "class_code",
    "booklet",
    "correct",
    "wrong",
    "blank",
    "net",
    "score",
    "normalized_score",
    "overall_rank",
    "class_rank",
    "lessons",
    "valid",
    "errors",
];

/// JSON document written by the parse command
#[derive(Debug, Serialize)]
pub struct ParseReport<'a> {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub files: &'a [FileReport],
}

/// Run the parse command
pub async fn run_parse(args: ParseArgs) -> Result<ImportStats> {
    setup_logging(&args.common)?;
    args.validate()?;

    let config = args.resolve_config()?;
    let files = discover_report_files(&args.common.inputs)
        .map_err(|e| Error::configuration(format!("{:#}", e)))?;
    info!("Parsing {} files with {} workers", files.len(), config.workers);

    let start = Instant::now();
    let progress = args
        .common
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Parsing reports"));

    let job_config = config.clone();
    let results = run_concurrently(files, config.workers, progress.as_ref(), move |path| {
        load_file(path, &job_config).map(|loaded| loaded.into_parsed(&job_config))
    })
    .await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let mut stats = ImportStats::default();
    let (reports, first_error) = partition_results(results, &mut stats);
    stats.processing_time = start.elapsed();

    match args.output_format {
        OutputFormat::Human => print_human(&reports, &stats),
        OutputFormat::Json => write_output(args.output_file.as_deref(), |writer| {
            write_json(&reports, writer)
        })?,
        OutputFormat::Csv => write_output(args.output_file.as_deref(), |writer| {
            write_csv(&reports, writer)
        })?,
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(stats),
    }
}

/// Send machine-readable output to a file or stdout
fn write_output<F>(output_file: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match output_file {
        Some(path) => {
            let mut file = File::create(path)
                .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
            write(&mut file)?;
            info!("Results written to {}", path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write(&mut handle)
        }
    }
}

/// Write every file report as one JSON document
pub fn write_json(reports: &[FileReport], writer: &mut dyn Write) -> Result<()> {
    let document = ParseReport {
        generated_at: chrono::Utc::now(),
        files: reports,
    };

    serde_json::to_writer_pretty(&mut *writer, &document)
        .map_err(|e| Error::serialization("Failed to write JSON results", e))?;
    writeln!(writer).map_err(|e| Error::io("Failed to write JSON results", e))?;
    Ok(())
}

/// Write one CSV row per extracted student
pub fn write_csv(reports: &[FileReport], writer: &mut dyn Write) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(CSV_HEADERS)
        .map_err(|e| Error::csv_export("Failed to write CSV header", e))?;

    for report in reports {
        let Some(outcome) = &report.outcome else {
            continue;
        };
        let file = report.path.display().to_string();

        for student in &outcome.students {
            csv_writer
                .write_record(csv_row(&file, student))
                .map_err(|e| {
                    Error::csv_export(format!("Failed to write row for {}", file), e)
                })?;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush CSV output", e))?;
    Ok(())
}

fn csv_row(file: &str, student: &StudentResult) -> Vec<String> {
    fn optional<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    let lessons = student
        .lessons
        .iter()
        .map(|lesson| {
            format!(
                "{}:{}/{}/{}/{}",
                lesson.subject.code(),
                lesson.correct,
                lesson.wrong,
                lesson.blank,
                lesson.net
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        file.to_string(),
        student.line_number.to_string(),
        student.student_number.clone(),
        student.full_name.clone(),
        student.class_code.clone().unwrap_or_default(),
        optional(student.booklet),
        student.correct.to_string(),
        student.wrong.to_string(),
        student.blank.to_string(),
        student.net.to_string(),
        optional(student.score),
        optional(student.normalized_score),
        optional(student.overall_rank),
        optional(student.class_rank),
        lessons,
        student.is_valid.to_string(),
        student.errors.join("; "),
    ]
}

/// Print a colored per-file summary
fn print_human(reports: &[FileReport], stats: &ImportStats) {
    for report in reports {
        println!("\n{}", report.path.display().to_string().bright_cyan().bold());
        println!(
            "  {} {} ({:.2}) {}",
            "Format:".bright_white(),
            report.classification.kind,
            report.classification.confidence,
            format!("[{}]", report.encoding).bright_black()
        );

        let Some(outcome) = &report.outcome else {
            if let Some(reason) = &report.skipped {
                println!("  {} {}", "Skipped:".bright_yellow(), reason);
            }
            continue;
        };

        let delimiter = outcome
            .delimiter
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {} rows, {} valid, {} invalid ({:.1}%), delimiter {}",
            "Rows:".bright_white(),
            outcome.summary.total,
            outcome.summary.success_count.to_string().bright_green(),
            outcome.summary.error_count.to_string().bright_red(),
            outcome.summary.success_rate(),
            delimiter
        );

        if !outcome.subjects.is_empty() {
            let subjects: Vec<_> = outcome.subjects.iter().map(|s| s.code()).collect();
            println!("  {} {}", "Subjects:".bright_white(), subjects.join(", "));
        }

        for warning in &outcome.warnings {
            println!("  {} {}", "Warning:".bright_yellow(), warning);
        }

        let invalid: Vec<_> = outcome.invalid_students().collect();
        for student in invalid.iter().take(MAX_LISTED_INVALID_ROWS) {
            println!(
                "  {} line {}: {}",
                "Invalid".bright_red(),
                student.line_number,
                student.errors.join("; ")
            );
        }
        if invalid.len() > MAX_LISTED_INVALID_ROWS {
            println!(
                "  ... and {} more invalid rows",
                invalid.len() - MAX_LISTED_INVALID_ROWS
            );
        }
    }

    println!("\n{}", "Import Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Files processed:".bright_white(),
        stats.files_processed.to_string().bright_white().bold()
    );
    if stats.files_skipped > 0 {
        println!(
            "  {} {}",
            "Files skipped:".bright_yellow(),
            stats.files_skipped.to_string().bright_yellow().bold()
        );
    }
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {} ({} invalid)",
        "Students:".bright_white(),
        stats.students.to_string().bright_white().bold(),
        stats.invalid_rows
    );
    println!(
        "  {} {:.2}s",
        "Time:".bright_white(),
        stats.processing_time.as_secs_f64()
    );
}
