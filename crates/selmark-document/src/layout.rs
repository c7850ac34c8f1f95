//! Deterministic monospace layout.
//!
//! Lays a tree out as a grid of fixed-size cells: block elements start new lines, every
//! character of a text node takes one cell, and `\n` inside text breaks the line. The result
//! gives every rendered node (and any byte range of a text node) a bounding box in document
//! coordinates, which is all the geometry the highlighter needs.

use std::{collections::HashMap, ops::Range};

use crate::node::{NodeKind, NodeRef};

/// Width of one character cell.
pub const CELL_WIDTH: f64 = 8.0;

/// Height of one line.
pub const LINE_HEIGHT: f64 = 16.0;

/// Tags laid out as blocks.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Tags whose subtrees are never rendered.
const HIDDEN_TAGS: &[&str] = &["head", "noscript", "script", "style", "template", "title"];

/// Returns true if `tag` is laid out as a block.
pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Returns true if `tag` is never rendered.
pub fn is_hidden_tag(tag: &str) -> bool {
    HIDDEN_TAGS.contains(&tag)
}

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Returns the same rectangle shifted vertically by `dy`.
    pub fn translate_y(&self, dy: f64) -> Self {
        Self::new(self.x, self.y + dy, self.width, self.height)
    }
}

/// One laid-out character.
#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Byte offset of the character within its text node.
    byte: usize,
    /// Cell occupied by the character.
    rect: Rect,
}

/// Computed geometry for a tree.
#[derive(Debug, Default)]
pub struct Layout {
    /// Character cells per text node.
    cells: HashMap<NodeRef, Vec<Cell>>,
    /// Bounding boxes of rendered nodes.
    boxes: HashMap<NodeRef, Rect>,
    /// Number of lines used.
    lines: usize,
}

impl Layout {
    /// Lays out the subtree rooted at `root`.
    pub fn compute(root: &NodeRef) -> Self {
        let mut cursor = Cursor::default();
        let mut layout = Self::default();
        layout.visit(root, &mut cursor);
        layout.lines = cursor.line + usize::from(cursor.col > 0);
        layout
    }

    /// Bounding box of a rendered node, `None` if it has no visible text.
    pub fn bounding_box(&self, node: &NodeRef) -> Option<Rect> {
        self.boxes.get(node).copied()
    }

    /// Bounding box of a byte range inside a text node.
    pub fn range_box(&self, node: &NodeRef, range: Range<usize>) -> Option<Rect> {
        self.cells
            .get(node)?
            .iter()
            .filter(|cell| range.contains(&cell.byte))
            .map(|cell| cell.rect)
            .reduce(|a, b| a.union(&b))
    }

    /// Total height of the laid-out content.
    pub fn content_height(&self) -> f64 {
        self.lines as f64 * LINE_HEIGHT
    }

    /// Recursive layout worker; returns the node's bounding box.
    fn visit(&mut self, node: &NodeRef, cursor: &mut Cursor) -> Option<Rect> {
        let tag = match &*node.kind() {
            NodeKind::Text(value) => {
                let cells = cursor.place_text(value);
                let bbox = cells.iter().map(|c| c.rect).reduce(|a, b| a.union(&b));
                self.cells.insert(node.clone(), cells);
                if let Some(rect) = bbox {
                    self.boxes.insert(node.clone(), rect);
                }
                return bbox;
            }
            NodeKind::Element(el) => el.tag.clone(),
        };

        if is_hidden_tag(&tag) {
            return None;
        }
        if tag == "br" {
            cursor.force_break();
            return None;
        }

        let block = is_block_tag(&tag);
        if block {
            cursor.soft_break();
        }
        let mut bbox: Option<Rect> = None;
        for child in node.children() {
            if let Some(rect) = self.visit(&child, cursor) {
                bbox = Some(bbox.map_or(rect, |b| b.union(&rect)));
            }
        }
        if block {
            cursor.soft_break();
        }

        if let Some(rect) = bbox {
            self.boxes.insert(node.clone(), rect);
        }
        bbox
    }
}

/// Current write position.
#[derive(Debug, Default)]
struct Cursor {
    /// Zero-based line.
    line: usize,
    /// Zero-based column.
    col: usize,
}

impl Cursor {
    /// Starts a new line unless already at the start of one.
    fn soft_break(&mut self) {
        if self.col > 0 {
            self.force_break();
        }
    }

    /// Starts a new line unconditionally.
    fn force_break(&mut self) {
        self.line += 1;
        self.col = 0;
    }

    /// Places every character of `value`, returning the occupied cells.
    fn place_text(&mut self, value: &str) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(value.len());
        for (byte, c) in value.char_indices() {
            if c == '\n' {
                self.force_break();
                continue;
            }
            cells.push(Cell {
                byte,
                rect: Rect::new(
                    self.col as f64 * CELL_WIDTH,
                    self.line as f64 * LINE_HEIGHT,
                    CELL_WIDTH,
                    LINE_HEIGHT,
                ),
            });
            self.col += 1;
        }
        cells
    }
}
