//! Input discovery for CLI commands
//!
//! Expands the positional inputs of a command into a sorted, de-duplicated
//! list of report files. An input may name a file, a directory (searched
//! recursively for report extensions) or a glob pattern.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::constants::REPORT_FILE_EXTENSIONS;

/// Resolve every input into report file paths
pub fn discover_report_files(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        let found = expand_input(input)?;
        if found.is_empty() {
            anyhow::bail!("No report files found for input '{}'", input);
        }
        files.extend(found);
    }

    debug!("Discovered {} report files", files.len());
    Ok(files.into_iter().collect())
}

/// Expand a single input argument
fn expand_input(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);

    if path.is_dir() {
        return walk_directory(path);
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if is_glob_pattern(input) {
        let mut files = Vec::new();
        for entry in glob::glob(input).with_context(|| format!("Invalid glob pattern '{}'", input))? {
            let entry = entry.context("Failed to read glob match")?;
            if entry.is_file() {
                files.push(entry);
            }
        }
        return Ok(files);
    }

    anyhow::bail!("Input path does not exist: {}", path.display())
}

/// Collect report files below a directory
fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk directory {}", dir.display()))?;
        if entry.file_type().is_file() && has_report_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Check whether a path carries one of the report extensions
pub fn has_report_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            REPORT_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
