//! Configuration management and validation.
//!
//! Provides the import settings shared by the CLI commands: worker count,
//! text decoding behaviour and the format classification threshold.
//! Settings are layered as defaults, then an optional JSON config file,
//! then command line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    DEFAULT_FALLBACK_ENCODING, DEFAULT_MIN_REPORT_CONFIDENCE, MAX_WORKERS, default_workers,
};
use crate::{Error, Result};

/// Directory name under the platform config directory
const CONFIG_DIR_NAME: &str = "exam-import";

/// Config file name inside [`CONFIG_DIR_NAME`]
const CONFIG_FILE_NAME: &str = "config.json";

/// Main configuration for report import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Number of files processed concurrently
    pub workers: usize,

    /// Encoding label used when input is not valid UTF-8
    pub fallback_encoding: String,

    /// Repair double-encoded UTF-8 text after decoding
    pub repair_mojibake: bool,

    /// Minimum classifier confidence before a file is parsed as a report
    pub min_report_confidence: f64,

    /// Parse every file as a report regardless of classification
    pub force_report: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            fallback_encoding: DEFAULT_FALLBACK_ENCODING.to_string(),
            repair_mojibake: true,
            min_report_confidence: DEFAULT_MIN_REPORT_CONFIDENCE,
            force_report: false,
        }
    }
}

impl ImportConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the fallback encoding label
    pub fn with_fallback_encoding(mut self, label: impl Into<String>) -> Self {
        self.fallback_encoding = label.into();
        self
    }

    /// Disable mojibake repair
    pub fn without_mojibake_repair(mut self) -> Self {
        self.repair_mojibake = false;
        self
    }

    /// Set the minimum report confidence
    pub fn with_min_report_confidence(mut self, confidence: f64) -> Self {
        self.min_report_confidence = confidence;
        self
    }

    /// Enable forced report parsing
    pub fn with_force_report(mut self) -> Self {
        self.force_report = true;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("Workers must be greater than 0"));
        }

        if self.workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "Workers cannot exceed {}",
                MAX_WORKERS
            )));
        }

        if !(0.0..=1.0).contains(&self.min_report_confidence) {
            return Err(Error::configuration(
                "Minimum report confidence must be between 0 and 1",
            ));
        }

        if encoding_rs::Encoding::for_label(self.fallback_encoding.trim().as_bytes()).is_none() {
            return Err(Error::unsupported_encoding(&self.fallback_encoding));
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the explicit config file, or the default one when it exists
    ///
    /// An explicit path must exist; a missing default file falls back to
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Default config file location under the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
