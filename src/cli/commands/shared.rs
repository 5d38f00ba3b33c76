//! Shared components for CLI commands
//!
//! This module contains the file loading pipeline (read, decode, classify,
//! parse), the concurrent file runner and the logging and progress setup
//! used by every command.

use crate::app::models::FormatClassification;
use crate::app::services::format_classifier::classify_format;
use crate::app::services::report_parser::{ParseOutcome, parse_report};
use crate::app::services::text_decoding::{DecodedText, decode_report_bytes};
use crate::cli::args::CommonArgs;
use crate::config::ImportConfig;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Import statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    /// Number of files read and classified
    pub files_processed: usize,
    /// Number of files not parsed because they are not reports
    pub files_skipped: usize,
    /// Number of files that could not be read or decoded
    pub files_failed: usize,
    /// Number of student rows extracted
    pub students: usize,
    /// Number of extracted rows carrying errors
    pub invalid_rows: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl ImportStats {
    /// Tally one finished file
    pub fn record(&mut self, report: &FileReport) {
        self.files_processed += 1;
        if let Some(outcome) = &report.outcome {
            self.students += outcome.summary.total;
            self.invalid_rows += outcome.summary.error_count;
        }
        if report.skipped.is_some() {
            self.files_skipped += 1;
        }
    }
}

/// A decoded and classified input file
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub decoded: DecodedText,
    pub classification: FormatClassification,
}

/// Result of processing one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,

    /// Encoding the file was decoded with
    pub encoding: String,

    /// True when double-encoded text was repaired
    pub repaired: bool,

    pub classification: FormatClassification,

    /// Parse outcome; absent when the file was not parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ParseOutcome>,

    /// Why the file was not parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// Read, decode and classify a report file
pub fn load_file(path: &Path, config: &ImportConfig) -> Result<LoadedFile> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    let mut decoded = decode_report_bytes(&bytes, &config.fallback_encoding)?;
    if decoded.text.contains('\0') {
        return Err(Error::decoding(
            path.display().to_string(),
            "file contains binary data",
        ));
    }
    if config.repair_mojibake {
        decoded = decoded.with_mojibake_repair();
        if decoded.repaired {
            info!("Repaired double-encoded text in {}", path.display());
        }
    }

    let classification = classify_format(&decoded.text);
    debug!(
        "{}: {} ({:.2}, {})",
        path.display(),
        classification.kind,
        classification.confidence,
        classification.reason
    );

    Ok(LoadedFile {
        path: path.to_path_buf(),
        decoded,
        classification,
    })
}

impl LoadedFile {
    /// Finish the file without parsing it
    pub fn into_classified(self) -> FileReport {
        FileReport {
            path: self.path,
            encoding: self.decoded.encoding,
            repaired: self.decoded.repaired,
            classification: self.classification,
            outcome: None,
            skipped: None,
        }
    }

    /// Parse the file when its classification allows it
    pub fn into_parsed(self, config: &ImportConfig) -> FileReport {
        let accepted = config.force_report
            || self
                .classification
                .accepts_report(config.min_report_confidence);

        let (outcome, skipped) = if accepted {
            (Some(parse_report(&self.decoded.text)), None)
        } else {
            let reason = Error::not_a_report(
                self.path.display().to_string(),
                format!(
                    "classified as {} ({})",
                    self.classification.kind, self.classification.reason
                ),
            )
            .to_string();
            warn!("{}", reason);
            (None, Some(reason))
        };

        FileReport {
            outcome,
            skipped,
            ..self.into_classified()
        }
    }
}

/// Run a blocking job over every file with bounded concurrency
///
/// Results come back in input order regardless of completion order.
pub async fn run_concurrently<T, F>(
    files: Vec<PathBuf>,
    workers: usize,
    progress: Option<&ProgressBar>,
    job: F,
) -> Vec<(PathBuf, Result<T>)>
where
    T: Send + 'static,
    F: Fn(&Path) -> Result<T> + Clone + Send + 'static,
{
    let mut results: Vec<(usize, PathBuf, Result<T>)> = stream::iter(files.into_iter().enumerate())
        .map(|(index, path)| {
            let job = job.clone();
            async move {
                let task_path = path.clone();
                let result = task::spawn_blocking(move || job(&task_path))
                    .await
                    .map_err(Error::from)
                    .and_then(|result| result);
                (index, path, result)
            }
        })
        .buffer_unordered(workers.max(1))
        .inspect(|(_, path, result)| {
            if let Some(pb) = progress {
                if let Some(file_name) = path.file_name() {
                    pb.set_message(format!("Processed: {}", file_name.to_string_lossy()));
                }
                pb.inc(1);
            }
            if let Err(e) = result {
                error!("Failed to process {}: {:#}", path.display(), e);
            }
        })
        .collect()
        .await;

    results.sort_by_key(|(index, _, _)| *index);
    results
        .into_iter()
        .map(|(_, path, result)| (path, result))
        .collect()
}

/// Split runner results into reports and the first failure
pub fn partition_results(
    results: Vec<(PathBuf, Result<FileReport>)>,
    stats: &mut ImportStats,
) -> (Vec<FileReport>, Option<Error>) {
    let mut reports = Vec::with_capacity(results.len());
    let mut first_error = None;

    for (_, result) in results {
        match result {
            Ok(report) => {
                stats.record(&report);
                reports.push(report);
            }
            Err(e) => {
                stats.files_failed += 1;
                first_error.get_or_insert(e);
            }
        }
    }

    (reports, first_error)
}

/// Set up structured logging for a command
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("exam_import={}", log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
