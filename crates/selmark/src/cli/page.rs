//! The page the CLI drives: a document body next to a control bar.
//!
//! The bar sits outside the scanned body and holds the position label, which a subscriber keeps
//! in step with the engine. Clicks and selections inside it are ignored by the engine.

use selmark_config::Config;
use selmark_document::{Document, LINE_HEIGHT, NodeRef};
use selmark_engine::{Clock, Coordinator, Host, LaidOutHost};

/// Id of the control bar element.
pub const BAR_ID: &str = "selmark-bar";

/// A document mounted for interaction.
pub struct Page {
    /// The whole rendered tree.
    pub html: NodeRef,
    /// The scanned document body.
    pub body: NodeRef,
    /// The control bar.
    pub bar: NodeRef,
    /// Text node holding the position label.
    label: NodeRef,
}

impl Page {
    /// Mounts a document.
    pub fn new(document: &Document) -> Self {
        let label = NodeRef::text("");
        let bar = NodeRef::element("div")
            .with_id(BAR_ID)
            .with_child(NodeRef::element("span").with_child(label.clone()));
        let html = NodeRef::element("html")
            .with_child(document.root.clone())
            .with_child(bar.clone());
        Self {
            html,
            body: document.root.clone(),
            bar,
            label,
        }
    }

    /// Current position label, empty when there are no matches.
    pub fn label(&self) -> String {
        self.label.text_value().unwrap_or_default()
    }

    /// The element holding the label.
    pub fn label_element(&self) -> Option<NodeRef> {
        self.label.parent()
    }

    /// Creates a coordinator over this page with a viewport `viewport_lines` tall.
    pub fn session<C: Clock>(
        &self,
        config: &Config,
        clock: C,
        viewport_lines: usize,
    ) -> Coordinator<LaidOutHost, C> {
        let host = LaidOutHost::new(self.html.clone(), viewport_lines as f64 * LINE_HEIGHT);
        let mut coordinator = Coordinator::new(self.body.clone(), host, clock, config);
        coordinator.set_control_surface(Some(self.bar.clone()));
        let label = self.label.clone();
        coordinator.subscribe(move |event| label.set_text_value(event.label().unwrap_or_default()));
        coordinator
    }
}

/// One-based document line of `node`, if it is rendered.
pub fn line_of(host: &LaidOutHost, node: &NodeRef) -> Option<usize> {
    let bbox = host.bounding_box(node)?;
    let top = bbox.y + host.viewport().scroll_y;
    Some((top / LINE_HEIGHT).round() as usize + 1)
}
