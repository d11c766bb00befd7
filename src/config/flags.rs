// src/config/flags.rs

//! Command-line-flags file parsing.
//!
//! The run operation passes extra flags to the built binary from a plain
//! text file at `<project_root>/command_line_flags.txt`: one flag per line,
//! blank lines and `#` comment lines ignored. A missing file simply means
//! "no flags".

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Name of the flags file, relative to the project root.
pub const FLAGS_FILE_NAME: &str = "command_line_flags.txt";

/// Load run flags from the given file.
///
/// Returns an empty list when the file does not exist.
pub fn load_flags_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = ?path, "no flags file; running without extra flags");
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading flags file at {:?}", path))?;

    Ok(parse_flags(&contents))
}

/// Parse flags file contents: each non-empty, non-`#`-prefixed line is one
/// flag token, whitespace-trimmed.
pub fn parse_flags(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
