//! Removing markers and returning a tree to its pre-scan shape.

use selmark_config::HighlightSettings;
use selmark_document::NodeRef;
use tracing::debug;

use crate::scan::is_marker;

/// Unwraps every marker under `root`, returning how many were removed.
///
/// Each marker's children take its place, and the parent is normalized so the text split by
/// the scan is merged back together. Idempotent: a tree with no markers is left unchanged.
pub fn restore(root: &NodeRef, settings: &HighlightSettings) -> usize {
    let markers: Vec<NodeRef> = root
        .descendants()
        .filter(|node| is_marker(node, settings))
        .collect();

    let mut removed = 0;
    for marker in markers {
        let Some(parent) = marker.parent() else {
            continue;
        };
        for child in marker.children() {
            marker.insert_before(&child);
        }
        marker.detach();
        parent.normalize();
        removed += 1;
    }

    if removed > 0 {
        debug!(removed, "restored markers");
    }
    removed
}
