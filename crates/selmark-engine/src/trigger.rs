//! When to scan: the selection trigger as an explicit state machine.
//!
//! [`transition`] is a pure function from the current [`Phase`] and an incoming
//! [`TriggerEvent`] to the next phase plus an [`Action`]. The coordinator owns the phase and
//! performs the actions. Keeping the table free of side effects means every interleaving of
//! mouse, selection and timer events can be tested directly.
//!
//! | phase        | event                   | next                       | action   |
//! |--------------|-------------------------|----------------------------|----------|
//! | Idle         | mouse down              | Dragging                   |          |
//! | Debouncing   | mouse down              | Dragging                   |          |
//! | Dragging     | mouse up                | Idle                       | Evaluate |
//! | Idle         | selection changed       | Debouncing(now + debounce) |          |
//! | Debouncing   | selection changed       | Debouncing(now + debounce) |          |
//! | Debouncing   | timer fired, due        | Idle                       | Evaluate |
//! | Scanning     | selection changed       | Scanning(rearm)            |          |
//! | Scanning     | scan completed, rearm   | Debouncing(now + debounce) |          |
//! | Scanning     | scan completed          | Idle                       |          |
//!
//! Every other combination leaves the phase unchanged. Mouse events from buttons other than
//! the primary one, or targeting the control surface, are always ignored.

use std::time::Duration;

/// Trigger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for input.
    Idle,
    /// The primary button is down outside the control surface.
    Dragging,
    /// A selection change is waiting out the quiet period.
    Debouncing {
        /// Time at which the pending evaluation becomes due.
        deadline: Duration,
    },
    /// A scan is running.
    Scanning {
        /// A selection change arrived mid-scan and must be re-evaluated afterwards.
        rearm: bool,
    },
}

impl Phase {
    /// The phase entered when an evaluation starts a scan.
    ///
    /// Scans only start from `Idle`; any other phase yields `None`.
    pub fn begin_scan(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Scanning { rearm: false }),
            _ => None,
        }
    }

    /// The pending debounce deadline, if any.
    pub fn deadline(self) -> Option<Duration> {
        match self {
            Self::Debouncing { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Short name for logging and display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Debouncing { .. } => "debouncing",
            Self::Scanning { .. } => "scanning",
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the middle button.
    Auxiliary,
}

/// Inputs to the trigger table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// A button was pressed.
    MouseDown {
        /// Which button.
        button: MouseButton,
        /// Whether the press landed on the control surface.
        on_surface: bool,
    },
    /// A button was released.
    MouseUp {
        /// Which button.
        button: MouseButton,
        /// Whether the release landed on the control surface.
        on_surface: bool,
    },
    /// The selection changed.
    SelectionChanged,
    /// The debounce timer fired.
    TimerFired,
    /// A scan finished.
    ScanCompleted,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    None,
    /// Read the selection and decide whether to scan.
    Evaluate,
}

/// Result of feeding one event to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the event.
    pub phase: Phase,
    /// Side effect to perform.
    pub action: Action,
}

impl Transition {
    /// Moves to `phase` with no side effect.
    fn to(phase: Phase) -> Self {
        Self {
            phase,
            action: Action::None,
        }
    }

    /// Moves to `Idle` and requests an evaluation.
    fn evaluate() -> Self {
        Self {
            phase: Phase::Idle,
            action: Action::Evaluate,
        }
    }
}

/// Returns true if a mouse event should be ignored outright.
fn ignored(button: MouseButton, on_surface: bool) -> bool {
    button != MouseButton::Primary || on_surface
}

/// Computes the next phase and action.
///
/// `now` is the current clock reading; `debounce` the quiet period for selection changes.
pub fn transition(phase: Phase, event: TriggerEvent, now: Duration, debounce: Duration) -> Transition {
    use Phase::{Debouncing, Dragging, Idle, Scanning};
    use TriggerEvent::{MouseDown, MouseUp, ScanCompleted, SelectionChanged, TimerFired};

    let debouncing = Debouncing {
        deadline: now + debounce,
    };
    match (phase, event) {
        (_, MouseDown { button, on_surface } | MouseUp { button, on_surface })
            if ignored(button, on_surface) =>
        {
            Transition::to(phase)
        }
        (Idle | Debouncing { .. }, MouseDown { .. }) => Transition::to(Dragging),
        (Dragging, MouseUp { .. }) => Transition::evaluate(),
        (Idle | Debouncing { .. }, SelectionChanged) => Transition::to(debouncing),
        (Debouncing { deadline }, TimerFired) if now >= deadline => Transition::evaluate(),
        (Scanning { .. }, SelectionChanged) => Transition::to(Scanning { rearm: true }),
        (Scanning { rearm: true }, ScanCompleted) => Transition::to(debouncing),
        (Scanning { rearm: false }, ScanCompleted) => Transition::to(Idle),
        _ => Transition::to(phase),
    }
}
