//! Report parser for pre-computed exam result files
//!
//! This module parses delimited result tables exported by optical reader
//! software and spreadsheets into typed per-student records. Scores are
//! extracted, never recomputed from raw answers.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Parse orchestration and line handling
//! - [`delimiter`] - Column delimiter detection and splitting
//! - [`header`] - Header cell normalization
//! - [`column_mapping`] - Column role inference
//! - [`record_parser`] - Individual row extraction
//! - [`field_parsers`] - Tolerant cell parsers
//! - [`stats`] - Parse summary and outcome structures
//!
//! ## Usage
//!
//! ```rust
//! use exam_import::app::services::report_parser::parse_report;
//!
//! let outcome = parse_report("OgrenciNo;AdSoyad;Net\n123;ali veli;42,5");
//!
//! println!("Parsed {} of {} rows",
//!          outcome.summary.success_count,
//!          outcome.summary.total);
//! assert_eq!(outcome.students[0].net, 42.5);
//! ```

pub mod column_mapping;
pub mod delimiter;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnRole, ColumnRoleMap};
pub use delimiter::Delimiter;
pub use parser::parse_report;
pub use stats::{ParseOutcome, ParseSummary};
