//! Document trees for selmark.
//!
//! This crate provides the mutable node tree the highlighter scans and marks:
//! - `NodeRef`, a shared handle supporting in-place splitting, wrapping and normalization
//! - builders from markdown and plain text
//! - a deterministic monospace layout supplying bounding boxes
//! - markup serialization for inspection

#![warn(missing_docs)]

mod build;
mod error;
mod layout;
mod markup;
mod node;
mod parse;

use std::path::PathBuf;

pub use build::{build_markdown_tree, build_text_tree};
pub use error::DocumentError;
pub use layout::{CELL_WIDTH, LINE_HEIGHT, Layout, Rect, is_block_tag, is_hidden_tag};
pub use markup::to_markup;
pub use node::{Ancestors, Element, NodeKind, NodeRef, Preorder};
pub use parse::{parse_file, parse_markdown, parse_text};

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path the document was read from.
    pub path: PathBuf,
    /// Document title (first h1 or filename).
    pub title: String,
    /// The `body` element holding the content.
    pub root: NodeRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shares_root() {
        let doc = parse_text("hello world", &PathBuf::from("a.txt"));
        let copy = doc.clone();
        copy.root.append(&NodeRef::element("p").with_text("!"));
        assert_eq!(doc.root.text_content(), "hello world!");
    }
}
