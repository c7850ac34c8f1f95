//! Notifications for whatever presents the match state.

use crate::navigate::format_label;

/// Emitted whenever the match set or the cursor changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Matches are present; `current` is the zero-based active index.
    MatchSetChanged {
        /// Active match index.
        current: usize,
        /// Number of matches.
        total: usize,
    },
    /// No matches are present.
    Cleared,
}

impl EngineEvent {
    /// Text for a position indicator, `None` for [`EngineEvent::Cleared`].
    pub fn label(&self) -> Option<String> {
        match self {
            Self::MatchSetChanged { current, total } => Some(format_label(*current, *total)),
            Self::Cleared => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let event = EngineEvent::MatchSetChanged {
            current: 1,
            total: 3,
        };
        assert_eq!(event.label().as_deref(), Some("2 / 3 matches"));
        assert_eq!(EngineEvent::Cleared.label(), None);
    }
}
