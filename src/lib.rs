//! Exam Import Library
//!
//! A Rust library for importing exam result reports produced by optical
//! answer-sheet readers and spreadsheet exports.
//!
//! This library provides tools for:
//! - Decoding report files from UTF-8 or the Turkish single-byte code page,
//!   with repair of double-encoded text
//! - Classifying a file as a pre-computed report or raw optical marks
//! - Sniffing the column delimiter (tab, semicolon, comma or aligned spaces)
//! - Mapping fuzzy, localized column headers onto semantic roles
//! - Extracting per-student and per-subject results without re-scoring
//! - Reporting file-level warnings and per-row validation errors
//!
//! ## Usage
//!
//! ```rust
//! use exam_import::parse_report;
//!
//! let text = "OgrenciNo\tAdSoyad\tDogru\tYanlis\n456\tAYSE KAYA\t20\t15";
//! let outcome = parse_report(text);
//!
//! assert_eq!(outcome.students.len(), 1);
//! assert_eq!(outcome.students[0].net, 15.0);
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod format_classifier;
        pub mod report_parser;
        pub mod text_decoding;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{
    Booklet, FieldKind, FormatClassification, FormatKind, LessonResult, StudentResult,
    SubjectCode,
};
pub use app::services::format_classifier::classify_format;
pub use app::services::report_parser::{Delimiter, ParseOutcome, ParseSummary, parse_report};
pub use app::services::text_decoding::{DecodedText, decode_report_bytes, repair_mojibake};
pub use config::ImportConfig;

/// Result type alias for the exam importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for exam import operations
///
/// Malformed report data never produces an error: the parser records
/// problems as warnings and per-row errors instead. These variants cover
/// file access, configuration and output serialization.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Unknown or unsupported text encoding label
    #[error("Unsupported encoding: {label}")]
    UnsupportedEncoding { label: String },

    /// Report bytes could not be decoded
    #[error("Decoding error in file '{file}': {message}")]
    Decoding { file: String, message: String },

    /// File was not recognized as a pre-computed report
    #[error("File '{file}' is not a result report: {reason}")]
    NotAReport { file: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV export error
    #[error("CSV export error: {message}")]
    CsvExport {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Background worker failed
    #[error("Worker error: {message}")]
    Worker { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an unsupported encoding error
    pub fn unsupported_encoding(label: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            label: label.into(),
        }
    }

    /// Create a decoding error
    pub fn decoding(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decoding {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a not-a-report error
    pub fn not_a_report(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotAReport {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a JSON serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV export error with context
    pub fn csv_export(message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvExport {
            message: message.into(),
            source,
        }
    }

    /// Create a worker error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvExport {
            message: "CSV export failed".to_string(),
            source: error,
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::worker(error.to_string())
    }
}
