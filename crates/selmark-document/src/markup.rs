//! Markup serialization for inspecting trees.

use crate::node::{NodeKind, NodeRef};

/// Serializes a node and its subtree as HTML-like markup.
///
/// Text is escaped so that marker boundaries stay visible: `cat <span class="m">dog</span>`.
pub fn to_markup(node: &NodeRef) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Recursive worker for [`to_markup`].
fn write_node(node: &NodeRef, out: &mut String) {
    let (tag, attrs) = match &*node.kind() {
        NodeKind::Text(value) => {
            escape_into(value, out);
            return;
        }
        NodeKind::Element(el) => {
            let mut attrs = String::new();
            if let Some(id) = &el.id {
                attrs.push_str(&format!(" id=\"{id}\""));
            }
            if !el.classes.is_empty() {
                attrs.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
            }
            (el.tag.clone(), attrs)
        }
    };

    out.push_str(&format!("<{tag}{attrs}>"));
    for child in node.children() {
        write_node(&child, out);
    }
    out.push_str(&format!("</{tag}>"));
}

/// Escapes markup-significant characters.
fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
