//! Wiring the trigger, scanner, restorer and navigation together.
//!
//! The [`Coordinator`] owns the document root, the host and a clock. Input events are turned
//! into [`TriggerEvent`]s and run through the trigger table; an `Evaluate` action reads the
//! selection and, when it names a new query, restores the tree, scans it and hands the result
//! to the [`NavigationController`]. Subscribers hear about every change as [`EngineEvent`]s.
//!
//! Nothing here is asynchronous. The host calls [`Coordinator::poll`] when the debounce
//! deadline from [`Coordinator::next_deadline`] has passed.

use std::{fmt, time::Duration};

use selmark_config::{Config, HighlightSettings};
use selmark_document::NodeRef;
use tracing::{debug, trace, warn};

use crate::{
    clock::Clock,
    events::EngineEvent,
    host::Host,
    navigate::NavigationController,
    pattern::Pattern,
    restore::restore,
    scan::{MatchSet, scan},
    selection::SelectionSnapshot,
    trigger::{Action, MouseButton, Phase, TriggerEvent, transition},
};

/// Raw input from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A button was pressed over `target`.
    MouseDown {
        /// Which button.
        button: MouseButton,
        /// Node under the pointer.
        target: Option<NodeRef>,
    },
    /// A button was released over `target`.
    MouseUp {
        /// Which button.
        button: MouseButton,
        /// Node under the pointer.
        target: Option<NodeRef>,
    },
    /// The selection changed.
    SelectionChanged,
}

/// A boxed event listener.
type Subscriber = Box<dyn FnMut(&EngineEvent)>;

/// Drives the engine from host input.
pub struct Coordinator<H, C> {
    /// Subtree that is scanned and restored.
    root: NodeRef,
    /// Environment services.
    host: H,
    /// Time source for debouncing.
    clock: C,
    /// Marking settings.
    highlight: HighlightSettings,
    /// Quiet period after selection changes.
    debounce: Duration,
    /// Trigger state.
    phase: Phase,
    /// Trimmed text of the last evaluated selection.
    last_query: Option<String>,
    /// Cursor over the current matches.
    navigation: NavigationController,
    /// UI owned by the host whose clicks and selections are ignored.
    control_surface: Option<NodeRef>,
    /// Event listeners.
    subscribers: Vec<Subscriber>,
    /// Number of scans run.
    scans: usize,
}

impl<H: Host, C: Clock> Coordinator<H, C> {
    /// Creates a coordinator over `root`.
    pub fn new(root: NodeRef, host: H, clock: C, config: &Config) -> Self {
        Self {
            root,
            host,
            clock,
            highlight: config.highlight.clone(),
            debounce: config.trigger.debounce(),
            phase: Phase::Idle,
            last_query: None,
            navigation: NavigationController::new(
                config.navigation.clone(),
                &config.highlight.active_class,
            ),
            control_surface: None,
            subscribers: Vec::new(),
            scans: 0,
        }
    }

    /// Sets the node whose subtree counts as the control surface.
    pub fn set_control_surface(&mut self, surface: Option<NodeRef>) {
        self.control_surface = surface;
    }

    /// Registers a listener for engine events.
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    /// Feeds one input event.
    pub fn handle(&mut self, event: InputEvent) {
        let event = match event {
            InputEvent::MouseDown { button, target } => TriggerEvent::MouseDown {
                button,
                on_surface: self.on_surface(target.as_ref()),
            },
            InputEvent::MouseUp { button, target } => TriggerEvent::MouseUp {
                button,
                on_surface: self.on_surface(target.as_ref()),
            },
            InputEvent::SelectionChanged => TriggerEvent::SelectionChanged,
        };
        self.feed(event);
    }

    /// Fires the debounce timer if it is due.
    pub fn poll(&mut self) {
        if let Some(deadline) = self.phase.deadline()
            && self.clock.now() >= deadline
        {
            self.feed(TriggerEvent::TimerFired);
        }
    }

    /// When [`Coordinator::poll`] next needs to be called, if at all.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.phase.deadline()
    }

    /// Moves to the next match.
    pub fn step_next(&mut self) {
        self.step(1);
    }

    /// Moves to the previous match.
    pub fn step_previous(&mut self) {
        self.step(-1);
    }

    /// Removes all markers and forgets the last query.
    ///
    /// A pending debounce is dropped; a drag in progress is kept.
    pub fn clear_all(&mut self) {
        self.clear_marks();
        self.last_query = None;
        if let Phase::Debouncing { .. } = self.phase {
            self.phase = Phase::Idle;
        }
        self.emit(EngineEvent::Cleared);
    }

    /// Current trigger phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last evaluated query.
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Navigation state.
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// The current matches.
    pub fn matches(&self) -> &MatchSet {
        self.navigation.matches()
    }

    /// The scanned subtree.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for changing its selection or viewport.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of scans run so far.
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    /// Returns true if `target` lies inside the control surface.
    fn on_surface(&self, target: Option<&NodeRef>) -> bool {
        match (&self.control_surface, target) {
            (Some(surface), Some(target)) => surface.contains(target),
            _ => false,
        }
    }

    /// Runs one event through the trigger table and performs the resulting action.
    fn feed(&mut self, event: TriggerEvent) {
        let next = transition(self.phase, event, self.clock.now(), self.debounce);
        if next.phase != self.phase {
            trace!(
                from = self.phase.name(),
                to = next.phase.name(),
                ?event,
                "trigger transition"
            );
        }
        self.phase = next.phase;
        if next.action == Action::Evaluate {
            self.evaluate();
        }
    }

    /// Decides what the current selection means and acts on it.
    fn evaluate(&mut self) {
        let selection = self.host.selection();
        if let (Some(selection), Some(surface)) = (&selection, &self.control_surface)
            && selection.touches(surface)
        {
            trace!("selection inside control surface, ignored");
            return;
        }

        let snapshot = selection.map_or_else(
            || SelectionSnapshot {
                text: String::new(),
                bounding_box: None,
            },
            |s| s.snapshot(),
        );
        if snapshot.text.chars().count() < self.highlight.min_query_len.max(1) {
            let had_state = self.last_query.is_some() || !self.navigation.matches().is_empty();
            let removed = self.clear_marks();
            self.last_query = None;
            if had_state || removed > 0 {
                debug!(removed, "selection too short, cleared");
                self.emit(EngineEvent::Cleared);
            }
            return;
        }
        if self.last_query.as_deref() == Some(snapshot.text.as_str()) {
            trace!(query = %snapshot.text, "query unchanged");
            return;
        }

        let Some(scanning) = self.phase.begin_scan() else {
            return;
        };
        self.phase = scanning;
        self.last_query = Some(snapshot.text.clone());
        self.run_scan(&snapshot);
        self.feed(TriggerEvent::ScanCompleted);
    }

    /// Restores, scans and initializes navigation for `snapshot`.
    fn run_scan(&mut self, snapshot: &SelectionSnapshot) {
        self.clear_marks();
        let matches = match Pattern::build(&snapshot.text) {
            Ok(pattern) => scan(&self.root, &pattern, &self.highlight),
            Err(e) => {
                warn!(error = %e, "selection not searchable");
                MatchSet::default()
            }
        };
        self.scans += 1;
        self.navigation
            .initialize(matches, snapshot, &mut self.host);
        let event = self.position_event();
        self.emit(event);
    }

    /// Restores the tree and empties navigation, returning the number of markers removed.
    fn clear_marks(&mut self) -> usize {
        self.navigation.clear();
        restore(&self.root, &self.highlight)
    }

    /// Steps and notifies.
    fn step(&mut self, delta: isize) {
        if self.navigation.total() == 0 {
            return;
        }
        self.navigation.step(delta, &mut self.host);
        let event = self.position_event();
        self.emit(event);
    }

    /// The event describing the current navigation state.
    fn position_event(&self) -> EngineEvent {
        match self.navigation.current() {
            Some(current) => EngineEvent::MatchSetChanged {
                current,
                total: self.navigation.total(),
            },
            None => EngineEvent::Cleared,
        }
    }

    /// Delivers an event to every subscriber.
    fn emit(&mut self, event: EngineEvent) {
        for listener in &mut self.subscribers {
            listener(&event);
        }
    }
}

impl<H, C> fmt::Debug for Coordinator<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("phase", &self.phase)
            .field("last_query", &self.last_query)
            .field("navigation", &self.navigation)
            .field("subscribers", &self.subscribers.len())
            .field("scans", &self.scans)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{clock::ManualClock, host::LaidOutHost};

    struct Fixture {
        coordinator: Coordinator<LaidOutHost, ManualClock>,
        clock: ManualClock,
        events: Rc<RefCell<Vec<EngineEvent>>>,
        surface: NodeRef,
    }

    fn fixture(text: &str) -> Fixture {
        let body = NodeRef::element("body").with_child(NodeRef::element("p").with_text(text));
        let surface = NodeRef::element("div")
            .with_id("bar")
            .with_child(NodeRef::element("span").with_text("label text"));
        let html = NodeRef::element("html")
            .with_child(body.clone())
            .with_child(surface.clone());
        let clock = ManualClock::new();
        let host = LaidOutHost::new(html, 200.0);
        let mut coordinator = Coordinator::new(body, host, clock.clone(), &Config::default());
        coordinator.set_control_surface(Some(surface.clone()));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        coordinator.subscribe(move |e| sink.borrow_mut().push(*e));
        Fixture {
            coordinator,
            clock,
            events,
            surface,
        }
    }

    fn down(target: Option<NodeRef>) -> InputEvent {
        InputEvent::MouseDown {
            button: MouseButton::Primary,
            target,
        }
    }

    fn up(target: Option<NodeRef>) -> InputEvent {
        InputEvent::MouseUp {
            button: MouseButton::Primary,
            target,
        }
    }

    fn drag_select(f: &mut Fixture, needle: &str, nth: usize) {
        f.coordinator.handle(down(None));
        assert!(f.coordinator.host_mut().select_occurrence(needle, nth));
        f.coordinator.handle(InputEvent::SelectionChanged);
        f.coordinator.handle(up(None));
    }

    #[test]
    fn test_mouse_release_scans_immediately() {
        let mut f = fixture("cat dog\ncat\nCAT");
        drag_select(&mut f, "cat", 1);

        assert_eq!(f.coordinator.phase(), Phase::Idle);
        assert_eq!(f.coordinator.scan_count(), 1);
        assert_eq!(f.coordinator.navigation().current(), Some(1));
        assert_eq!(
            f.events.borrow().last(),
            Some(&EngineEvent::MatchSetChanged {
                current: 1,
                total: 3
            })
        );
    }

    #[test]
    fn test_keyboard_selection_debounces() {
        let mut f = fixture("cat dog cat");
        f.coordinator.host_mut().select_occurrence("dog", 0);
        f.coordinator.handle(InputEvent::SelectionChanged);
        f.clock.advance(Duration::from_millis(100));
        f.coordinator.handle(InputEvent::SelectionChanged);

        f.clock.advance(Duration::from_millis(100));
        f.coordinator.poll();
        assert_eq!(f.coordinator.scan_count(), 0);
        assert_eq!(f.coordinator.next_deadline(), Some(Duration::from_millis(250)));

        f.clock.advance(Duration::from_millis(50));
        f.coordinator.poll();
        assert_eq!(f.coordinator.scan_count(), 1);
        assert_eq!(f.coordinator.matches().len(), 1);
        assert_eq!(f.coordinator.next_deadline(), None);
    }

    #[test]
    fn test_same_query_not_rescanned() {
        let mut f = fixture("cat dog cat");
        drag_select(&mut f, "cat", 0);
        drag_select(&mut f, "cat", 1);
        assert_eq!(f.coordinator.scan_count(), 1);
        assert_eq!(f.coordinator.last_query(), Some("cat"));
    }

    #[test]
    fn test_short_selection_clears() {
        let mut f = fixture("cat dog cat");
        drag_select(&mut f, "cat", 0);
        assert_eq!(f.coordinator.matches().len(), 2);

        drag_select(&mut f, "d", 0);
        assert!(f.coordinator.matches().is_empty());
        assert_eq!(f.coordinator.last_query(), None);
        assert_eq!(f.events.borrow().last(), Some(&EngineEvent::Cleared));
        assert_eq!(f.coordinator.root().text_content(), "cat dog cat");
        assert_eq!(f.coordinator.root().first_child().unwrap().child_count(), 1);
    }

    #[test]
    fn test_deselect_clears() {
        let mut f = fixture("cat dog cat");
        drag_select(&mut f, "cat", 0);

        f.coordinator.handle(down(None));
        f.coordinator.host_mut().deselect();
        f.coordinator.handle(up(None));
        assert!(f.coordinator.matches().is_empty());

        drag_select(&mut f, "cat", 0);
        assert_eq!(f.coordinator.scan_count(), 2);
    }

    #[test]
    fn test_control_surface_ignored() {
        let mut f = fixture("cat dog cat");
        drag_select(&mut f, "cat", 0);
        let label = f.surface.first_child().unwrap();

        f.coordinator.handle(down(Some(label.clone())));
        assert_eq!(f.coordinator.phase(), Phase::Idle);

        f.coordinator.host_mut().select_node(&label);
        f.coordinator.handle(InputEvent::SelectionChanged);
        f.clock.advance(Duration::from_millis(150));
        f.coordinator.poll();
        assert_eq!(f.coordinator.scan_count(), 1);
        assert_eq!(f.coordinator.matches().len(), 2);
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut f = fixture("cat dog");
        f.coordinator.handle(InputEvent::MouseDown {
            button: MouseButton::Secondary,
            target: None,
        });
        assert_eq!(f.coordinator.phase(), Phase::Idle);
    }

    #[test]
    fn test_step_and_clear_all() {
        let mut f = fixture("cat dog\ncat\nCAT");
        drag_select(&mut f, "cat", 1);
        assert_eq!(f.coordinator.navigation().current(), Some(1));

        f.coordinator.step_next();
        f.coordinator.step_next();
        assert_eq!(f.coordinator.navigation().current(), Some(0));
        f.coordinator.step_previous();
        assert_eq!(f.coordinator.navigation().label().as_deref(), Some("3 / 3 matches"));

        f.coordinator.clear_all();
        assert!(f.coordinator.matches().is_empty());
        assert_eq!(f.coordinator.last_query(), None);
        assert_eq!(f.events.borrow().last(), Some(&EngineEvent::Cleared));
        assert_eq!(f.coordinator.root().text_content(), "cat dog\ncat\nCAT");

        drag_select(&mut f, "cat", 0);
        assert_eq!(f.coordinator.scan_count(), 2);
    }

    #[test]
    fn test_no_matches_emits_cleared() {
        let mut f = fixture("cat dog");
        f.coordinator.host_mut().select(" zebra ", None, None, None);
        f.coordinator.handle(down(None));
        f.coordinator.handle(up(None));
        assert_eq!(f.coordinator.scan_count(), 1);
        assert_eq!(f.events.borrow().as_slice(), &[EngineEvent::Cleared]);
        assert_eq!(f.coordinator.last_query(), Some("zebra"));
    }

    #[test]
    fn test_step_without_matches_is_silent() {
        let mut f = fixture("cat dog");
        f.coordinator.step_next();
        f.coordinator.step_previous();
        assert!(f.events.borrow().is_empty());
    }

    #[test]
    fn test_deselect_removes_markers_left_by_another_scan() {
        let mut f = fixture("a cat b");
        let marker_class = HighlightSettings::default().marker_class;
        let pattern = Pattern::build("cat").unwrap();
        let stray = scan(f.coordinator.root(), &pattern, &HighlightSettings::default());
        assert_eq!(stray.len(), 1);

        f.coordinator.host_mut().deselect();
        f.coordinator.handle(InputEvent::SelectionChanged);
        f.clock.advance(Duration::from_millis(200));
        f.coordinator.poll();

        let root = f.coordinator.root();
        assert!(!root.preorder().any(|n| n.has_class(&marker_class)));
        assert_eq!(root.text_content(), "a cat b");
        assert_eq!(root.first_child().unwrap().child_count(), 1);
        assert_eq!(f.events.borrow().as_slice(), &[EngineEvent::Cleared]);
        assert_eq!(f.coordinator.last_query(), None);
    }

    #[test]
    fn test_deselect_on_clean_tree_is_silent() {
        let mut f = fixture("a cat b");
        f.coordinator.handle(InputEvent::SelectionChanged);
        f.clock.advance(Duration::from_millis(200));
        f.coordinator.poll();
        assert!(f.events.borrow().is_empty());
    }
}
