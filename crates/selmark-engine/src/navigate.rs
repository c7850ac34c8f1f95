//! The cursor over the current match set.
//!
//! The controller owns the [`MatchSet`] produced by a scan and keeps exactly one span active
//! whenever the set is non-empty. The initial cursor is the match nearest to where the user
//! selected; stepping wraps around in both directions and scrolls the new active match into
//! view.

use selmark_config::NavigationSettings;
use tracing::debug;

use crate::{
    host::{Host, ScrollBehavior},
    scan::{MatchSet, MatchSpan},
    selection::SelectionSnapshot,
};

/// Tracks and moves the active match.
#[derive(Debug)]
pub struct NavigationController {
    /// Current matches in document order.
    matches: MatchSet,
    /// Index of the active match; `Some` exactly when `matches` is non-empty.
    current: Option<usize>,
    /// Scrolling behavior.
    settings: NavigationSettings,
    /// Class applied to the active marker.
    active_class: String,
}

impl NavigationController {
    /// Creates an empty controller.
    pub fn new(settings: NavigationSettings, active_class: &str) -> Self {
        Self {
            matches: MatchSet::default(),
            current: None,
            settings,
            active_class: active_class.to_string(),
        }
    }

    /// Takes ownership of a fresh match set and activates the match nearest the selection.
    ///
    /// An empty set leaves the controller empty.
    pub fn initialize(
        &mut self,
        matches: MatchSet,
        snapshot: &SelectionSnapshot,
        host: &mut dyn Host,
    ) {
        self.clear();
        if matches.is_empty() {
            return;
        }
        self.matches = matches;
        let nearest = self.nearest(snapshot, host);
        self.activate(nearest);
        debug!(
            total = self.matches.len(),
            current = nearest,
            "navigation initialized"
        );
        if self.settings.scroll_on_initialize {
            self.scroll_to_current(host);
        }
    }

    /// Makes the match at `index` the only active one.
    ///
    /// Out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) {
        if index >= self.matches.len() {
            return;
        }
        if let Some(previous) = self.current
            && let Some(span) = self.matches.get_mut(previous)
        {
            span.set_active(false, &self.active_class);
        }
        if let Some(span) = self.matches.get_mut(index) {
            span.set_active(true, &self.active_class);
        }
        self.current = Some(index);
    }

    /// Moves the cursor by `delta`, wrapping at both ends, and scrolls to the new match.
    ///
    /// Does nothing when there are no matches.
    pub fn step(&mut self, delta: isize, host: &mut dyn Host) {
        let total = self.matches.len();
        if total == 0 {
            return;
        }
        let from = self.current.unwrap_or(0);
        let next = wrap(from, delta, total);
        self.activate(next);
        self.scroll_to_current(host);
    }

    /// Forgets the match set. The marker nodes themselves are left to the restorer.
    pub fn clear(&mut self) {
        self.matches = MatchSet::default();
        self.current = None;
    }

    /// Index of the active match.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The active match.
    pub fn current_span(&self) -> Option<&MatchSpan> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// The matches being navigated.
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// Number of matches.
    pub fn total(&self) -> usize {
        self.matches.len()
    }

    /// Text like `"2 / 5 matches"`, or `None` when empty.
    pub fn label(&self) -> Option<String> {
        self.current
            .map(|current| format_label(current, self.matches.len()))
    }

    /// Index of the match whose vertical center is closest to the selection's.
    ///
    /// Falls back to the first match if the selection has no geometry. Ties go to the earlier
    /// match.
    fn nearest(&self, snapshot: &SelectionSnapshot, host: &dyn Host) -> usize {
        let Some(selection) = snapshot.bounding_box else {
            return 0;
        };
        let target = selection.center_y();
        let boxes = host.bounding_boxes(&self.matches.nodes());

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, bbox) in boxes.iter().enumerate() {
            let Some(bbox) = bbox else {
                continue;
            };
            let distance = (bbox.center_y() - target).abs();
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    /// Scrolls so the active match sits at the configured fraction of the viewport.
    fn scroll_to_current(&self, host: &mut dyn Host) {
        let Some(span) = self.current_span() else {
            return;
        };
        let Some(bbox) = host.bounding_box(span.node()) else {
            return;
        };
        let viewport = host.viewport();
        let top = bbox.y + viewport.scroll_y - viewport.height * self.settings.scroll_fraction;
        let behavior = if self.settings.smooth_scroll {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        host.scroll_to(top, behavior);
    }
}

/// Formats the one-based position label.
pub fn format_label(current: usize, total: usize) -> String {
    format!("{} / {} matches", current + 1, total)
}

/// `(from + delta) mod total`, always in `0..total`.
fn wrap(from: usize, delta: isize, total: usize) -> usize {
    let total = total as isize;
    (from as isize + delta).rem_euclid(total) as usize
}
