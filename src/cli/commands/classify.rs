//! Classify command implementation
//!
//! Reports whether each input looks like a pre-computed result report or
//! raw optical data, without parsing any rows.

use colored::*;
use std::time::Instant;
use tracing::info;

use super::shared::{
    FileReport, ImportStats, create_progress_bar, load_file, partition_results,
    run_concurrently, setup_logging,
};
use crate::app::models::FormatKind;
use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::cli::input::discover_report_files;
use crate::{Error, Result};

/// Run the classify command
pub async fn run_classify(args: ClassifyArgs) -> Result<ImportStats> {
    setup_logging(&args.common)?;
    args.validate()?;

    let config = args.resolve_config()?;
    let files = discover_report_files(&args.common.inputs)
        .map_err(|e| Error::configuration(format!("{:#}", e)))?;
    info!("Classifying {} files", files.len());

    let start = Instant::now();
    let progress = args
        .common
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Classifying files"));

    let job_config = config.clone();
    let results = run_concurrently(files, config.workers, progress.as_ref(), move |path| {
        load_file(path, &job_config).map(|loaded| loaded.into_classified())
    })
    .await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let mut stats = ImportStats::default();
    let (reports, first_error) = partition_results(results, &mut stats);
    stats.processing_time = start.elapsed();

    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| Error::serialization("Failed to serialize classifications", e))?;
            println!("{}", json);
        }
        _ => print_classifications(&reports),
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(stats),
    }
}

fn print_classifications(reports: &[FileReport]) {
    for report in reports {
        let classification = &report.classification;
        let kind = match classification.kind {
            FormatKind::Report => classification.kind.to_string().bright_green(),
            FormatKind::RawOptical => classification.kind.to_string().bright_yellow(),
            FormatKind::Unknown => classification.kind.to_string().bright_red(),
        };

        println!(
            "{}  {} {:.2}  {}",
            report.path.display().to_string().bright_cyan(),
            kind.bold(),
            classification.confidence,
            classification.reason.bright_black()
        );
    }
}
