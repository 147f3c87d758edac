//! Manual content preservation across regenerations.

use std::fs;

use navindex_nav::ResolvedPath;

use crate::GenerateError;
use crate::stitch::START_MARKER;

/// Prefix used when there is no prior output or it holds no manual content.
const DEFAULT_PREFIX: [&str; 3] = ["# Index", "", ""];

/// Read the manual prefix of an existing output file.
///
/// Returns the default prefix when the file doesn't exist.
///
/// # Errors
///
/// Returns [`GenerateError::Read`] if the file exists but can't be read as
/// UTF-8. Callers must not overwrite the file in that case.
pub fn extract_manual_prefix(output: &ResolvedPath) -> Result<Vec<String>, GenerateError> {
    let path = output.as_path();
    if !path.exists() {
        return Ok(default_prefix());
    }

    let content = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(manual_prefix_of(&content))
}

/// Extract the manual prefix from output text.
///
/// Lines are copied verbatim up to (not including) the start marker; with
/// no marker the whole text is manual. Trailing blank lines are replaced by
/// exactly two, so the prefix is stable across runs.
pub fn manual_prefix_of(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content
        .lines()
        .take_while(|line| line.trim() != START_MARKER)
        .map(str::to_owned)
        .collect();

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return default_prefix();
    }

    lines.extend([String::new(), String::new()]);
    lines
}

fn default_prefix() -> Vec<String> {
    DEFAULT_PREFIX.map(str::to_owned).to_vec()
}
