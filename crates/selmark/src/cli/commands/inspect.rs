//! Implementation of `selmark inspect`.

use std::process::ExitCode;

use selmark_document::{LINE_HEIGHT, Layout, NodeKind, NodeRef, to_markup};
use selmark_highlight::{dim, header};

use super::shared::load_document;
use crate::cli::args::InspectCommand;

/// Longest text preview shown in the outline.
const PREVIEW_CHARS: usize = 60;

/// Shows how a document is parsed into a tree.
pub fn run(cmd: &InspectCommand) -> ExitCode {
    let document = match load_document(&cmd.file) {
        Ok(doc) => doc,
        Err(code) => return code,
    };

    let file_type = match cmd.file.extension().and_then(|e| e.to_str()) {
        Some("txt") => "text",
        _ => "markdown",
    };
    println!(
        "--- {} ---",
        header(&format!("{} ({file_type})", cmd.file.display()))
    );
    println!("{}", dim(&format!("title: {}", document.title)));

    let (elements, texts) = count_nodes(&document.root);
    let lines = (Layout::compute(&document.root).content_height() / LINE_HEIGHT).round() as usize;
    println!(
        "{}",
        dim(&format!("{elements} elements, {texts} text nodes, {lines} lines"))
    );
    println!();

    if cmd.markup {
        println!("{}", to_markup(&document.root));
    } else {
        let mut out = String::new();
        outline(&document.root, 0, &mut out);
        print!("{out}");
    }

    ExitCode::SUCCESS
}

/// Counts element and text nodes under `root`, inclusive.
fn count_nodes(root: &NodeRef) -> (usize, usize) {
    root.preorder()
        .fold((0, 0), |(elements, texts), node| {
            if node.is_text() {
                (elements, texts + 1)
            } else {
                (elements + 1, texts)
            }
        })
}

/// Writes an indented outline of the tree.
fn outline(node: &NodeRef, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match &*node.kind() {
        NodeKind::Text(value) => {
            out.push_str(&format!("{indent}{:?}\n", preview(value)));
            return;
        }
        NodeKind::Element(el) => {
            let mut line = format!("{indent}{}", el.tag);
            if let Some(id) = &el.id {
                line.push_str(&format!("#{id}"));
            }
            for class in &el.classes {
                line.push_str(&format!(".{class}"));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    for child in node.children() {
        outline(&child, depth + 1, out);
    }
}

/// Shortens long text for display.
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}
