//! Command-line argument definitions for the exam report importer
//!
//! This module defines the CLI interface using the clap derive API. Both
//! subcommands share the input and tuning options in [`CommonArgs`].

use crate::config::ImportConfig;
use crate::constants::MAX_WORKERS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the exam report importer
///
/// Reads exam result reports exported by optical reader software or
/// spreadsheets and extracts per-student results.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "exam-import",
    version,
    about = "Extract per-student exam results from optical reader report files",
    long_about = "Reads delimited exam result reports (tab, semicolon, comma or space aligned), \
                  maps their localized column headers and extracts per-student and per-subject \
                  results. Malformed rows are reported, never dropped."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse report files into per-student results
    Parse(ParseArgs),
    /// Classify files as result reports or raw optical data
    Classify(ClassifyArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Input files, directories or glob patterns
    ///
    /// Directories are searched recursively for .txt, .csv, .tsv and .dat files.
    #[arg(value_name = "INPUT", required = true, help = "Input files, directories or glob patterns")]
    pub inputs: Vec<String>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// exam-import/config.json in the platform config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of files processed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of files processed concurrently"
    )]
    pub workers: Option<usize>,

    /// Encoding used when a file is not valid UTF-8
    #[arg(
        long = "encoding",
        value_name = "LABEL",
        help = "Fallback encoding for non UTF-8 files (default: windows-1254)"
    )]
    pub encoding: Option<String>,

    /// Do not repair double-encoded UTF-8 text
    #[arg(long = "no-repair", help = "Do not repair double-encoded UTF-8 text")]
    pub no_repair: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Parse every file as a report regardless of its classification
    #[arg(
        long = "force-report",
        help = "Parse files even when they do not look like result reports"
    )]
    pub force_report: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Output file for json or csv results
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for json or csv results"
    )]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the classify command
#[derive(Debug, Clone, Parser)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format for classifications
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for classifications"
    )]
    pub output_format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format, one row per student
    Csv,
}

impl CommonArgs {
    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0",
                ));
            }

            if workers > MAX_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Apply command line overrides on top of a loaded configuration
    pub fn apply_to(&self, mut config: ImportConfig) -> ImportConfig {
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(encoding) = &self.encoding {
            config = config.with_fallback_encoding(encoding.clone());
        }
        if self.no_repair {
            config = config.without_mojibake_repair();
        }
        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ParseArgs {
    /// Validate the parse command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if self.output_file.is_some() && self.output_format == OutputFormat::Human {
            return Err(Error::configuration(
                "--output requires --output-format json or csv",
            ));
        }

        if let Some(parent) = self.output_file.as_ref().and_then(|file| file.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output file directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Build the effective configuration: file, then command line overrides
    pub fn resolve_config(&self) -> Result<ImportConfig> {
        let config = ImportConfig::load(self.common.config_file.as_deref())?;
        let mut config = self.common.apply_to(config);
        if self.force_report {
            config = config.with_force_report();
        }
        config.validate()?;
        Ok(config)
    }
}

impl ClassifyArgs {
    /// Validate the classify command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if self.output_format == OutputFormat::Csv {
            return Err(Error::configuration(
                "classify supports human or json output",
            ));
        }

        Ok(())
    }

    /// Build the effective configuration: file, then command line overrides
    pub fn resolve_config(&self) -> Result<ImportConfig> {
        let config = self
            .common
            .apply_to(ImportConfig::load(self.common.config_file.as_deref())?);
        config.validate()?;
        Ok(config)
    }
}
