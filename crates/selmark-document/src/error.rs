//! Error types for loading documents.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading a document from disk.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read the file.
    #[error("failed to read document {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file extension is not a supported document format.
    #[error("unsupported document type (expected .md, .markdown or .txt): {path}")]
    UnsupportedFileType {
        /// Path to the unsupported file.
        path: PathBuf,
    },
}
