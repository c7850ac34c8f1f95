//! The boundary between the engine and whatever renders the tree.
//!
//! The engine never measures or scrolls anything itself. Geometry, the live selection and
//! scrolling all go through [`Host`]. [`LaidOutHost`] implements it over the deterministic
//! monospace [`Layout`], which is what the CLI and the tests drive.

use selmark_document::{Layout, NodeRef, Rect};

use crate::selection::Selection;

/// How a scroll request should be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scroll.
    Smooth,
    /// Jump immediately.
    Instant,
}

/// The visible region of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Document offset of the top of the viewport.
    pub scroll_y: f64,
    /// Visible height.
    pub height: f64,
}

/// A recorded scroll request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Requested document offset, before clamping.
    pub top: f64,
    /// Requested behavior.
    pub behavior: ScrollBehavior,
}

/// Services the engine needs from its environment.
///
/// All rectangles are in viewport coordinates: document position minus the scroll offset.
pub trait Host {
    /// The current selection, if any.
    fn selection(&self) -> Option<Selection>;

    /// Bounding box of a node, `None` if it isn't rendered.
    fn bounding_box(&self, node: &NodeRef) -> Option<Rect>;

    /// Bounding boxes of several nodes, in the same order.
    fn bounding_boxes(&self, nodes: &[NodeRef]) -> Vec<Option<Rect>> {
        nodes.iter().map(|node| self.bounding_box(node)).collect()
    }

    /// The current viewport.
    fn viewport(&self) -> Viewport;

    /// Scrolls so the document offset `top` is at the top of the viewport.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// A selection held by [`LaidOutHost`], in document coordinates.
#[derive(Debug, Clone)]
struct HeldSelection {
    /// Selected text.
    text: String,
    /// Bounding box in document coordinates.
    bounding_box: Option<Rect>,
    /// Start node.
    anchor: Option<NodeRef>,
    /// End node.
    focus: Option<NodeRef>,
}

/// A host backed by [`Layout`].
///
/// Layout is recomputed on demand, so geometry always reflects the current tree, including
/// markers inserted by a scan.
#[derive(Debug)]
pub struct LaidOutHost {
    /// The whole rendered tree.
    root: NodeRef,
    /// Current viewport.
    viewport: Viewport,
    /// Current selection.
    selection: Option<HeldSelection>,
    /// Every scroll request received, oldest first.
    scrolls: Vec<ScrollRequest>,
}

impl LaidOutHost {
    /// Creates a host rendering `root` in a viewport of the given height, scrolled to the top.
    pub fn new(root: NodeRef, viewport_height: f64) -> Self {
        Self {
            root,
            viewport: Viewport {
                scroll_y: 0.0,
                height: viewport_height,
            },
            selection: None,
            scrolls: Vec::new(),
        }
    }

    /// The rendered tree.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Sets an arbitrary selection. `bounding_box` is in document coordinates.
    pub fn select(
        &mut self,
        text: &str,
        bounding_box: Option<Rect>,
        anchor: Option<NodeRef>,
        focus: Option<NodeRef>,
    ) {
        self.selection = Some(HeldSelection {
            text: text.to_string(),
            bounding_box,
            anchor,
            focus,
        });
    }

    /// Selects the `nth` (zero-based) rendered occurrence of `needle`, matched exactly.
    ///
    /// Occurrences are counted in document order within single text nodes. Returns false and
    /// leaves the selection unchanged if there is no such occurrence.
    pub fn select_occurrence(&mut self, needle: &str, nth: usize) -> bool {
        if needle.is_empty() {
            return false;
        }
        let layout = Layout::compute(&self.root);
        let mut seen = 0;
        for node in self.root.preorder() {
            let Some(text) = node.text_value() else {
                continue;
            };
            if layout.bounding_box(&node).is_none() {
                continue;
            }
            for (start, found) in text.match_indices(needle) {
                if seen == nth {
                    let bbox = layout.range_box(&node, start..start + found.len());
                    self.select(found, bbox, Some(node.clone()), Some(node.clone()));
                    return true;
                }
                seen += 1;
            }
        }
        false
    }

    /// Selects the whole text of `node`.
    pub fn select_node(&mut self, node: &NodeRef) {
        let layout = Layout::compute(&self.root);
        let anchor = node.preorder().find(NodeRef::is_text).unwrap_or_else(|| node.clone());
        self.select(
            &node.text_content(),
            layout.bounding_box(node),
            Some(anchor),
            Some(node.clone()),
        );
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Every scroll request received, oldest first.
    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    /// The most recent scroll request.
    pub fn last_scroll(&self) -> Option<ScrollRequest> {
        self.scrolls.last().copied()
    }

    /// Largest reachable scroll offset.
    fn max_scroll(&self) -> f64 {
        (Layout::compute(&self.root).content_height() - self.viewport.height).max(0.0)
    }
}

impl Host for LaidOutHost {
    fn selection(&self) -> Option<Selection> {
        let held = self.selection.as_ref()?;
        Some(Selection {
            text: held.text.clone(),
            bounding_box: held
                .bounding_box
                .map(|r| r.translate_y(-self.viewport.scroll_y)),
            anchor: held.anchor.clone(),
            focus: held.focus.clone(),
        })
    }

    fn bounding_box(&self, node: &NodeRef) -> Option<Rect> {
        Layout::compute(&self.root)
            .bounding_box(node)
            .map(|r| r.translate_y(-self.viewport.scroll_y))
    }

    fn bounding_boxes(&self, nodes: &[NodeRef]) -> Vec<Option<Rect>> {
        let layout = Layout::compute(&self.root);
        nodes
            .iter()
            .map(|node| {
                layout
                    .bounding_box(node)
                    .map(|r| r.translate_y(-self.viewport.scroll_y))
            })
            .collect()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.push(ScrollRequest { top, behavior });
        self.viewport.scroll_y = top.clamp(0.0, self.max_scroll());
    }
}
