//! Column delimiter detection for report files
//!
//! Report files come from optical reader software and spreadsheet exports,
//! so the separator varies between tabs, semicolons, commas and runs of
//! alignment spaces. The delimiter is sniffed once from the header line and
//! then applied to every row.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace run pattern is valid"));

/// Separator between columns of a report table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Tab,
    Semicolon,
    Comma,
    /// Two or more consecutive whitespace characters (space-aligned dumps)
    Whitespace,
}

impl Delimiter {
    /// Detect the delimiter from the header line
    ///
    /// Tab wins when its count is at least both others, then semicolon when
    /// it is at least the comma count, then comma. A line without any of
    /// the three falls back to whitespace runs. Counts of zero never win.
    pub fn detect(header_line: &str) -> Self {
        let tabs = header_line.matches('\t').count();
        let semicolons = header_line.matches(';').count();
        let commas = header_line.matches(',').count();

        if tabs > 0 && tabs >= semicolons && tabs >= commas {
            Delimiter::Tab
        } else if semicolons > 0 && semicolons >= commas {
            Delimiter::Semicolon
        } else if commas > 0 {
            Delimiter::Comma
        } else {
            Delimiter::Whitespace
        }
    }

    /// Split a line into trimmed fields
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        // Plain split rather than a csv reader: quotes are ordinary cell text
        match self {
            Delimiter::Tab => line.split('\t').map(str::trim).collect(),
            Delimiter::Semicolon => line.split(';').map(str::trim).collect(),
            Delimiter::Comma => line.split(',').map(str::trim).collect(),
            // Alignment padding before the first column is not a field
            Delimiter::Whitespace => WHITESPACE_RUN.split(line.trim()).map(str::trim).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::Tab => "tab",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Comma => "comma",
            Delimiter::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
