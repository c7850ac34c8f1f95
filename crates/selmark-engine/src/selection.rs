//! Selections as read from the host.

use selmark_document::{NodeRef, Rect};

/// The host's current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected text, untrimmed.
    pub text: String,
    /// Bounding box of the selected range in viewport coordinates.
    pub bounding_box: Option<Rect>,
    /// Node where the selection starts.
    pub anchor: Option<NodeRef>,
    /// Node where the selection ends.
    pub focus: Option<NodeRef>,
}

impl Selection {
    /// Returns true if either endpoint lies inside `surface`.
    pub fn touches(&self, surface: &NodeRef) -> bool {
        [&self.anchor, &self.focus]
            .into_iter()
            .flatten()
            .any(|node| surface.contains(node))
    }

    /// Captures the parts needed after the tree has been mutated.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            text: self.text.trim().to_string(),
            bounding_box: self.bounding_box,
        }
    }
}

/// A selection captured before scanning.
///
/// Scanning splits and rewraps text, which can invalidate the live selection, so the query and
/// its position are read once up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    /// Trimmed selected text.
    pub text: String,
    /// Bounding box of the selection in viewport coordinates, if it had one.
    pub bounding_box: Option<Rect>,
}
