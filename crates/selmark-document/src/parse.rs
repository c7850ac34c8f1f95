//! High-level document parsing API.
//!
//! Turns markdown and text files into `Document`s whose `root` is a mutable `body` tree.

use std::{fs, path::Path};

use crate::{
    Document, DocumentError,
    build::{build_markdown_tree, build_text_tree},
    node::NodeRef,
};

/// Parses a markdown string into a document.
pub fn parse_markdown(content: &str, path: &Path) -> Document {
    let root = build_markdown_tree(content);
    let title = first_heading(&root).unwrap_or_else(|| title_from_path(path));
    Document {
        path: path.to_path_buf(),
        title,
        root,
    }
}

/// Parses a plain text string into a document.
pub fn parse_text(content: &str, path: &Path) -> Document {
    Document {
        path: path.to_path_buf(),
        title: title_from_path(path),
        root: build_text_tree(content),
    }
}

/// Parses a file from disk, detecting type by extension.
///
/// Supported extensions:
/// - `.md`, `.markdown` - parsed as markdown
/// - `.txt` - parsed as plain text
pub fn parse_file(path: &Path) -> Result<Document, DocumentError> {
    let kind = match path.extension().and_then(|e| e.to_str()) {
        Some("md" | "markdown") => FileKind::Markdown,
        Some("txt") => FileKind::Text,
        _ => {
            return Err(DocumentError::UnsupportedFileType {
                path: path.to_path_buf(),
            });
        }
    };

    let content = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match kind {
        FileKind::Markdown => parse_markdown(&content, path),
        FileKind::Text => parse_text(&content, path),
    })
}

/// Supported input formats.
enum FileKind {
    /// CommonMark.
    Markdown,
    /// Plain text.
    Text,
}

/// Text of the first `h1`, if any.
fn first_heading(root: &NodeRef) -> Option<String> {
    root.descendants()
        .find(|n| n.has_tag("h1"))
        .map(|h| h.text_content().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Falls back to the file stem.
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}
