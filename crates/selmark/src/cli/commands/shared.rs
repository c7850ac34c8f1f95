//! Helpers shared by document commands.

use std::{path::Path, process::ExitCode};

use selmark_document::{Document, parse_file};

use crate::cli::args::DEFAULT_VIEWPORT_LINES;

/// Parses a document, exiting with a consistent error on failure.
pub fn load_document(path: &Path) -> Result<Document, ExitCode> {
    if !path.exists() {
        eprintln!("error: file not found: {}", path.display());
        return Err(ExitCode::FAILURE);
    }
    parse_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Viewport height from a flag, falling back to the default and never zero.
pub fn viewport_lines(flag: Option<usize>) -> usize {
    flag.unwrap_or(DEFAULT_VIEWPORT_LINES).max(1)
}
