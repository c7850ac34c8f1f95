//! Scanning a tree for a pattern and wrapping each occurrence in a marker element.
//!
//! The walk is depth-first in document order. Each text node is searched repeatedly: the node
//! is split around the first occurrence, the occurrence is moved into a fresh marker element,
//! and the search continues in the remainder. Subtrees under excluded tags and under existing
//! markers are never entered, so a scan can't nest markers or touch script content.

use selmark_config::HighlightSettings;
use selmark_document::NodeRef;
use tracing::debug;

use crate::pattern::Pattern;

/// One marked occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Position in document order.
    ordinal: usize,
    /// The marker element wrapping the occurrence.
    node: NodeRef,
    /// Whether this span is the active one.
    active: bool,
}

impl MatchSpan {
    /// Position of this span in document order, starting at zero.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The marker element.
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Whether this span is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The marked text.
    pub fn text(&self) -> String {
        self.node.text_content()
    }

    /// Marks or unmarks this span as active, keeping the marker's classes in step.
    pub(crate) fn set_active(&mut self, active: bool, active_class: &str) {
        self.active = active;
        if active {
            self.node.add_class(active_class);
        } else {
            self.node.remove_class(active_class);
        }
    }
}

/// The ordered result of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    /// Spans in document order.
    spans: Vec<MatchSpan>,
}

impl MatchSet {
    /// Spans in document order.
    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The span at `index`.
    pub fn get(&self, index: usize) -> Option<&MatchSpan> {
        self.spans.get(index)
    }

    /// Marker nodes in document order.
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.spans.iter().map(|s| s.node.clone()).collect()
    }

    /// Mutable access for the navigation controller.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut MatchSpan> {
        self.spans.get_mut(index)
    }

    /// Appends a new span with the next ordinal.
    fn push(&mut self, node: NodeRef) {
        self.spans.push(MatchSpan {
            ordinal: self.spans.len(),
            node,
            active: false,
        });
    }
}

/// Returns true if `node` is a marker element created by a scan.
pub fn is_marker(node: &NodeRef, settings: &HighlightSettings) -> bool {
    node.is_element() && node.has_class(&settings.marker_class)
}

/// Wraps every occurrence of `pattern` under `root` in a marker element.
///
/// Patterns shorter than the configured minimum mark nothing. The root itself is always
/// descended into, even if its tag is excluded.
pub fn scan(root: &NodeRef, pattern: &Pattern, settings: &HighlightSettings) -> MatchSet {
    let mut matches = MatchSet::default();
    if pattern.literal_len() < settings.min_query_len.max(1) {
        return matches;
    }
    for child in root.children() {
        walk(&child, pattern, settings, &mut matches);
    }
    debug!(
        pattern = pattern.literal(),
        matches = matches.len(),
        "scan complete"
    );
    matches
}

/// Recursive worker for [`scan`].
fn walk(node: &NodeRef, pattern: &Pattern, settings: &HighlightSettings, out: &mut MatchSet) {
    if node.is_text() {
        mark_text(node, pattern, settings, out);
        return;
    }
    if is_marker(node, settings) {
        return;
    }
    if let Some(tag) = node.tag()
        && settings.is_excluded_tag(&tag)
    {
        return;
    }
    // Snapshot first: marking a text child inserts new siblings.
    for child in node.children() {
        walk(&child, pattern, settings, out);
    }
}

/// Marks every occurrence inside one text node, left to right.
fn mark_text(node: &NodeRef, pattern: &Pattern, settings: &HighlightSettings, out: &mut MatchSet) {
    let mut rest = node.clone();
    loop {
        let Some(text) = rest.text_value() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let Some(range) = pattern.find(&text) else {
            return;
        };
        if range.is_empty() {
            return;
        }
        let Some(matched) = rest.split_text(range.start) else {
            return;
        };
        let Some(after) = matched.split_text(range.len()) else {
            return;
        };
        let marker = NodeRef::element(settings.marker_tag.as_str()).with_class(&settings.marker_class);
        matched.replace_with(&marker);
        marker.append(&matched);
        out.push(marker);
        rest = after;
    }
}
