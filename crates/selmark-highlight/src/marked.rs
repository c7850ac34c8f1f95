//! Terminal rendering of a marked document tree.

use selmark_document::{NodeKind, NodeRef, is_block_tag, is_hidden_tag};

use crate::colors;

/// Classes identifying marker elements.
#[derive(Debug, Clone, Copy)]
pub struct MarkClasses<'a> {
    /// Class on every marker.
    pub marker: &'a str,
    /// Class on the active marker.
    pub active: &'a str,
}

/// Renders the visible text of `root`, one line per block, with markers made visible.
///
/// With `color`, markers get a highlighted background and the active one a distinct color.
/// Without it, markers are bracketed as `[text]` and the active one as `[>text<]`.
pub fn render_marked(root: &NodeRef, classes: MarkClasses<'_>, color: bool) -> String {
    let mut renderer = Renderer {
        out: String::new(),
        classes,
        color,
    };
    renderer.visit(root);
    let trimmed = renderer.out.trim_end_matches('\n').len();
    renderer.out.truncate(trimmed);
    renderer.out
}

/// Accumulates rendered output.
struct Renderer<'a> {
    /// Output so far.
    out: String,
    /// Marker classes.
    classes: MarkClasses<'a>,
    /// Whether to emit ANSI styling.
    color: bool,
}

impl Renderer<'_> {
    /// Renders one node and its subtree.
    fn visit(&mut self, node: &NodeRef) {
        let tag = match &*node.kind() {
            NodeKind::Text(value) => {
                self.out.push_str(value);
                return;
            }
            NodeKind::Element(el) => el.tag.clone(),
        };
        if is_hidden_tag(&tag) {
            return;
        }
        if tag == "br" {
            self.out.push('\n');
            return;
        }

        let block = is_block_tag(&tag);
        if block {
            self.line_start();
        }
        if node.has_class(self.classes.marker) {
            let active = node.has_class(self.classes.active);
            self.open_mark(active);
            self.children(node);
            self.close_mark(active);
        } else {
            self.children(node);
        }
        if block {
            self.line_start();
        }
    }

    /// Renders every child.
    fn children(&mut self, node: &NodeRef) {
        for child in node.children() {
            self.visit(&child);
        }
    }

    /// Starts a new line unless already at the start of one.
    fn line_start(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Emits the opening of a marker.
    fn open_mark(&mut self, active: bool) {
        let open = match (self.color, active) {
            (true, true) => colors::ACTIVE_MARK,
            (true, false) => colors::MARK,
            (false, true) => "[>",
            (false, false) => "[",
        };
        self.out.push_str(open);
    }

    /// Emits the closing of a marker.
    fn close_mark(&mut self, active: bool) {
        let close = match (self.color, active) {
            (true, _) => colors::RESET,
            (false, true) => "<]",
            (false, false) => "]",
        };
        self.out.push_str(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: MarkClasses<'static> = MarkClasses {
        marker: "m",
        active: "a",
    };

    fn marker(text: &str) -> NodeRef {
        NodeRef::element("span").with_class("m").with_text(text)
    }

    fn sample() -> NodeRef {
        NodeRef::element("body")
            .with_child(
                NodeRef::element("p")
                    .with_text("a ")
                    .with_child(marker("cat"))
                    .with_text(" and ")
                    .with_child(marker("Cat").with_class("a")),
            )
            .with_child(NodeRef::element("script").with_text("cat"))
            .with_child(NodeRef::element("p").with_text("end"))
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(
            render_marked(&sample(), CLASSES, false),
            "a [cat] and [>Cat<]\nend"
        );
    }

    #[test]
    fn test_color_rendering() {
        let out = render_marked(&sample(), CLASSES, true);
        assert!(out.contains(&format!("{}cat{}", colors::MARK, colors::RESET)));
        assert!(out.contains(&format!("{}Cat{}", colors::ACTIVE_MARK, colors::RESET)));
        assert!(!out.contains('['));
    }

    #[test]
    fn test_line_breaks() {
        let root = NodeRef::element("body")
            .with_child(
                NodeRef::element("p")
                    .with_text("one")
                    .with_child(NodeRef::element("br"))
                    .with_text("two"),
            )
            .with_child(NodeRef::element("h1").with_text("three"));
        assert_eq!(render_marked(&root, CLASSES, false), "one\ntwo\nthree");
    }
}
