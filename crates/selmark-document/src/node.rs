//! Mutable document tree.
//!
//! Nodes are reference counted and shared: a `NodeRef` stays valid while siblings around it are
//! split, inserted, or removed, which is what lets the scanner hand out handles to the markers it
//! creates. Parents hold strong references to children; children hold weak references back.

use std::{
    cell::{Ref, RefCell},
    fmt,
    hash::{Hash, Hasher},
    ptr,
    rc::{Rc, Weak},
};

use crate::markup::to_markup;

/// An element's identity and styling hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Optional unique identifier.
    pub id: Option<String>,
    /// Class list in insertion order, without duplicates.
    pub classes: Vec<String>,
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with children.
    Element(Element),
    /// A run of text. Text nodes never have children.
    Text(String),
}

/// Storage behind a `NodeRef`.
struct Node {
    /// Node payload.
    kind: NodeKind,
    /// Weak link to the parent, empty for detached nodes and roots.
    parent: Weak<RefCell<Self>>,
    /// Children in document order.
    children: Vec<NodeRef>,
}

/// A shared handle to a node in a document tree.
///
/// Equality and hashing are by identity, not by content.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    /// Creates a detached node.
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(Node {
            kind,
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    /// Creates a detached element with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Element(Element {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
        }))
    }

    /// Creates a detached text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(value.into()))
    }

    /// Builder: adds a class and returns the node.
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: sets the id and returns the node.
    pub fn with_id(self, id: &str) -> Self {
        self.set_id(id);
        self
    }

    /// Builder: appends a child and returns the node.
    pub fn with_child(self, child: Self) -> Self {
        self.append(&child);
        self
    }

    /// Builder: appends a text child and returns the node.
    pub fn with_text(self, value: &str) -> Self {
        self.with_child(Self::text(value))
    }

    /// Borrows the node payload.
    pub fn kind(&self) -> Ref<'_, NodeKind> {
        Ref::map(self.0.borrow(), |node| &node.kind)
    }

    /// Returns true for text nodes.
    pub fn is_text(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Text(_))
    }

    /// Returns true for elements.
    pub fn is_element(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Element(_))
    }

    /// Returns the tag name for elements.
    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element(el) => Some(el.tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns true if this is an element with the given tag (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        match &self.0.borrow().kind {
            NodeKind::Element(el) => el.tag.eq_ignore_ascii_case(tag),
            NodeKind::Text(_) => false,
        }
    }

    /// Returns the value of a text node.
    pub fn text_value(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Text(value) => Some(value.clone()),
            NodeKind::Element(_) => None,
        }
    }

    /// Replaces the value of a text node. Elements are left untouched.
    pub fn set_text_value(&self, value: impl Into<String>) {
        if let NodeKind::Text(current) = &mut self.0.borrow_mut().kind {
            *current = value.into();
        }
    }

    /// Appends to the value of a text node.
    fn push_text(&self, value: &str) {
        if let NodeKind::Text(current) = &mut self.0.borrow_mut().kind {
            current.push_str(value);
        }
    }

    /// Returns the element id.
    pub fn id(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element(el) => el.id.clone(),
            NodeKind::Text(_) => None,
        }
    }

    /// Sets the element id.
    pub fn set_id(&self, id: &str) {
        if let NodeKind::Element(el) = &mut self.0.borrow_mut().kind {
            el.id = Some(id.to_string());
        }
    }

    /// Returns the element classes.
    pub fn classes(&self) -> Vec<String> {
        match &self.0.borrow().kind {
            NodeKind::Element(el) => el.classes.clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        match &self.0.borrow().kind {
            NodeKind::Element(el) => el.classes.iter().any(|c| c == class),
            NodeKind::Text(_) => false,
        }
    }

    /// Adds a class to an element if not already present.
    pub fn add_class(&self, class: &str) {
        if let NodeKind::Element(el) = &mut self.0.borrow_mut().kind
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_string());
        }
    }

    /// Removes a class from an element.
    pub fn remove_class(&self, class: &str) {
        if let NodeKind::Element(el) = &mut self.0.borrow_mut().kind {
            el.classes.retain(|c| c != class);
        }
    }

    /// Returns the parent node, if attached.
    pub fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(Self)
    }

    /// Returns a snapshot of the children.
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Returns the first child.
    pub fn first_child(&self) -> Option<Self> {
        self.0.borrow().children.first().cloned()
    }

    /// Returns the next sibling.
    pub fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let index = self.index_in_parent()?;
        parent.0.borrow().children.get(index + 1).cloned()
    }

    /// Returns the previous sibling.
    pub fn previous_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let index = self.index_in_parent()?;
        let index = index.checked_sub(1)?;
        parent.0.borrow().children.get(index).cloned()
    }

    /// Position of this node among its parent's children.
    fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let index = parent.0.borrow().children.iter().position(|c| c == self);
        index
    }

    /// Returns an iterator over the ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Returns true if `other` is this node or one of its descendants.
    pub fn contains(&self, other: &Self) -> bool {
        other == self || other.ancestors().any(|a| &a == self)
    }

    /// Appends `child` as the last child, detaching it from any previous parent.
    pub fn append(&self, child: &Self) {
        self.insert_child(self.child_count(), child);
    }

    /// Inserts `child` at `index` among the children, detaching it from any previous parent.
    ///
    /// An index past the end appends.
    pub fn insert_child(&self, index: usize, child: &Self) {
        debug_assert!(!child.contains(self), "cannot insert a node into itself");
        child.detach();
        let mut node = self.0.borrow_mut();
        let index = index.min(node.children.len());
        node.children.insert(index, child.clone());
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    }

    /// Inserts `new` as the sibling immediately before this node.
    ///
    /// Does nothing if this node has no parent.
    pub fn insert_before(&self, new: &Self) {
        if new == self {
            return;
        }
        new.detach();
        if let (Some(parent), Some(index)) = (self.parent(), self.index_in_parent()) {
            parent.insert_child(index, new);
        }
    }

    /// Inserts `new` as the sibling immediately after this node.
    ///
    /// Does nothing if this node has no parent.
    pub fn insert_after(&self, new: &Self) {
        if new == self {
            return;
        }
        new.detach();
        if let (Some(parent), Some(index)) = (self.parent(), self.index_in_parent()) {
            parent.insert_child(index + 1, new);
        }
    }

    /// Removes this node from its parent. The node and its subtree stay usable.
    pub fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent.0.borrow_mut().children.retain(|c| c != self);
        self.0.borrow_mut().parent = Weak::new();
    }

    /// Puts `new` in this node's place and detaches this node.
    pub fn replace_with(&self, new: &Self) {
        if new == self {
            return;
        }
        self.insert_before(new);
        self.detach();
    }

    /// Splits a text node at a byte offset.
    ///
    /// This node keeps the text before `offset`; a new text node holding the rest is inserted
    /// after it (when attached) and returned. Returns `None` for elements or when `offset` is
    /// not a char boundary.
    pub fn split_text(&self, offset: usize) -> Option<Self> {
        let tail = {
            let mut node = self.0.borrow_mut();
            let NodeKind::Text(value) = &mut node.kind else {
                return None;
            };
            if !value.is_char_boundary(offset) {
                return None;
            }
            value.split_off(offset)
        };
        let tail = Self::text(tail);
        self.insert_after(&tail);
        Some(tail)
    }

    /// Merges adjacent text children and drops empty ones, recursively.
    pub fn normalize(&self) {
        let mut run_head: Option<Self> = None;
        for child in self.children() {
            match child.text_value() {
                Some(value) if value.is_empty() => child.detach(),
                Some(value) => match &run_head {
                    Some(head) => {
                        head.push_text(&value);
                        child.detach();
                    }
                    None => run_head = Some(child),
                },
                None => {
                    run_head = None;
                    child.normalize();
                }
            }
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.preorder() {
            if let NodeKind::Text(value) = &*node.kind() {
                out.push_str(value);
            }
        }
        out
    }

    /// Iterates over this node and all descendants in pre-order (depth-first).
    ///
    /// Children are snapshotted when their parent is visited.
    pub fn preorder(&self) -> Preorder {
        Preorder {
            stack: vec![self.clone()],
        }
    }

    /// Iterates over all descendants in pre-order, excluding this node.
    pub fn descendants(&self) -> impl Iterator<Item = Self> {
        self.preorder().skip(1)
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl Hash for NodeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", to_markup(self))
    }
}

/// Pre-order traversal iterator.
pub struct Preorder {
    /// Nodes still to visit; the next node is on top.
    stack: Vec<NodeRef>,
}

impl Iterator for Preorder {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

/// Iterator over a node's ancestors.
pub struct Ancestors {
    /// Next ancestor to yield.
    next: Option<NodeRef>,
}

impl Iterator for Ancestors {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.parent();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> NodeRef {
        NodeRef::element("p").with_text(text)
    }

    #[test]
    fn test_append_sets_parent() {
        let body = NodeRef::element("body");
        let p = paragraph("hello");
        body.append(&p);

        assert_eq!(p.parent(), Some(body.clone()));
        assert_eq!(body.child_count(), 1);
        assert_eq!(body.text_content(), "hello");
    }

    #[test]
    fn test_append_moves_between_parents() {
        let a = NodeRef::element("div");
        let b = NodeRef::element("div");
        let t = NodeRef::text("x");
        a.append(&t);
        b.append(&t);

        assert_eq!(a.child_count(), 0);
        assert_eq!(b.child_count(), 1);
        assert_eq!(t.parent(), Some(b));
    }

    #[test]
    fn test_tag_is_lowercased() {
        let el = NodeRef::element("SCRIPT");
        assert_eq!(el.tag().as_deref(), Some("script"));
        assert!(el.has_tag("Script"));
    }

    #[test]
    fn test_split_text_inserts_tail_after() {
        let p = paragraph("cat dog");
        let text = p.first_child().unwrap();

        let tail = text.split_text(4).unwrap();

        assert_eq!(text.text_value().as_deref(), Some("cat "));
        assert_eq!(tail.text_value().as_deref(), Some("dog"));
        assert_eq!(text.next_sibling(), Some(tail));
        assert_eq!(p.text_content(), "cat dog");
    }

    #[test]
    fn test_split_text_rejects_non_boundary() {
        let text = NodeRef::text("héllo");
        assert!(text.split_text(2).is_none());
        assert!(NodeRef::element("p").split_text(0).is_none());
    }

    #[test]
    fn test_split_text_at_ends() {
        let p = paragraph("abc");
        let text = p.first_child().unwrap();
        let tail = text.split_text(0).unwrap();
        assert_eq!(text.text_value().as_deref(), Some(""));
        assert_eq!(tail.text_value().as_deref(), Some("abc"));
        assert_eq!(p.child_count(), 2);
    }

    #[test]
    fn test_replace_with_keeps_position() {
        let p = NodeRef::element("p")
            .with_text("a")
            .with_text("b")
            .with_text("c");
        let middle = p.children()[1].clone();
        let span = NodeRef::element("span").with_text("B");

        middle.replace_with(&span);

        assert_eq!(p.children()[1], span);
        assert!(middle.parent().is_none());
        assert_eq!(p.text_content(), "aBc");
    }

    #[test]
    fn test_normalize_merges_and_drops_empty() {
        let p = NodeRef::element("p")
            .with_text("a")
            .with_text("")
            .with_text("b")
            .with_child(NodeRef::element("em").with_text("x").with_text("y"))
            .with_text("c");

        p.normalize();

        assert_eq!(p.child_count(), 3);
        assert_eq!(p.children()[0].text_value().as_deref(), Some("ab"));
        assert_eq!(p.children()[1].child_count(), 1);
        assert_eq!(p.text_content(), "abxyc");
    }

    #[test]
    fn test_preorder_order() {
        let body = NodeRef::element("body")
            .with_child(NodeRef::element("h1").with_text("title"))
            .with_child(NodeRef::element("p").with_text("one").with_text("two"));

        let visited: Vec<String> = body
            .preorder()
            .map(|n| n.tag().or_else(|| n.text_value()).unwrap())
            .collect();

        assert_eq!(visited, vec!["body", "h1", "title", "p", "one", "two"]);
    }

    #[test]
    fn test_contains_and_ancestors() {
        let inner = NodeRef::text("deep");
        let em = NodeRef::element("em").with_child(inner.clone());
        let body = NodeRef::element("body").with_child(NodeRef::element("p").with_child(em));

        assert!(body.contains(&inner));
        assert!(inner.contains(&inner));
        assert!(!inner.contains(&body));
        let tags: Vec<String> = inner.ancestors().filter_map(|a| a.tag()).collect();
        assert_eq!(tags, vec!["em", "p", "body"]);
    }

    #[test]
    fn test_classes() {
        let span = NodeRef::element("span").with_class("mark");
        span.add_class("mark");
        span.add_class("active");
        assert_eq!(span.classes(), vec!["mark", "active"]);

        span.remove_class("active");
        assert!(!span.has_class("active"));
        assert!(span.has_class("mark"));
    }

    #[test]
    fn test_identity_equality() {
        let a = NodeRef::text("same");
        let b = NodeRef::text("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
