//! Literal, case-insensitive search patterns.
//!
//! Selections are searched for verbatim: every regex metacharacter is escaped, so a selection
//! such as `a.b (c)` only ever matches itself, in any letter case.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors building a pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The escaped literal exceeded the regex engine's size limits.
    #[error("selection of {len} characters is too large to search for: {source}")]
    TooLarge {
        /// Length of the literal in characters.
        len: usize,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// A compiled literal pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The text being searched for, as given.
    literal: String,
    /// Escaped, case-insensitive matcher.
    regex: Regex,
}

impl Pattern {
    /// Builds a pattern matching `raw` literally and case-insensitively.
    pub fn build(raw: &str) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(&regex::escape(raw))
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::TooLarge {
                len: raw.chars().count(),
                source,
            })?;
        Ok(Self {
            literal: raw.to_string(),
            regex,
        })
    }

    /// The literal text this pattern searches for.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Length of the literal in characters.
    pub fn literal_len(&self) -> usize {
        self.literal.chars().count()
    }

    /// Byte range of the first match in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<Range<usize>> {
        self.regex.find(haystack).map(|m| m.range())
    }

    /// Number of non-overlapping matches in `haystack`.
    pub fn count(&self, haystack: &str) -> usize {
        self.regex.find_iter(haystack).count()
    }
}
