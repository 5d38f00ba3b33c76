//! Command implementations for the exam report importer CLI
//!
//! This module contains the command dispatch. Each command is implemented
//! in its own module; the file pipeline and logging setup they share live
//! in [`shared`].

pub mod classify;
pub mod parse;
pub mod shared;

pub use shared::ImportStats;

use crate::Result;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler:
/// - `parse`: decode, classify and parse report files
/// - `classify`: decode and classify report files only
pub async fn run(command: Commands) -> Result<ImportStats> {
    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args).await,
        Commands::Classify(classify_args) => classify::run_classify(classify_args).await,
    }
}
