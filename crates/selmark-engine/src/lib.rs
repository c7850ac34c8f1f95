//! The selmark match-and-mark engine.
//!
//! Given a mutable document tree, the engine finds every case-insensitive occurrence of a
//! selected string, wraps each one in a marker element, and keeps a cursor over the markers:
//!
//! - [`Pattern`] turns a selection into a literal matcher
//! - [`scan`] marks occurrences and returns them as a [`MatchSet`]
//! - [`restore`] removes markers and merges the split text back together
//! - [`NavigationController`] owns the match set, the active match and scrolling
//! - [`transition`] is the pure trigger table deciding when a selection is evaluated
//! - [`Coordinator`] drives all of the above from host input
//!
//! Geometry, selections and scrolling come from a [`Host`]. [`LaidOutHost`] provides them
//! over a deterministic layout.

#![warn(missing_docs)]

mod clock;
mod coordinator;
mod events;
mod host;
mod navigate;
mod pattern;
mod restore;
mod scan;
mod selection;
mod trigger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use coordinator::{Coordinator, InputEvent};
pub use events::EngineEvent;
pub use host::{Host, LaidOutHost, ScrollBehavior, ScrollRequest, Viewport};
pub use navigate::{NavigationController, format_label};
pub use pattern::{Pattern, PatternError};
pub use restore::restore;
pub use scan::{MatchSet, MatchSpan, is_marker, scan};
pub use selection::{Selection, SelectionSnapshot};
pub use trigger::{Action, MouseButton, Phase, Transition, TriggerEvent, transition};
