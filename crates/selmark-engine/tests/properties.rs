//! Property-based invariant tests for scanning and restoring.
//!
//! 1. Scan then restore reproduces the original tree exactly
//! 2. Scanning never changes the rendered text
//! 3. Match count equals the non-overlapping occurrences in scannable text nodes
//! 4. Ordinals follow document order
//! 5. Excluded subtrees are never modified

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use proptest::prelude::*;
use selmark_config::HighlightSettings;
use selmark_document::{NodeRef, to_markup};
use selmark_engine::{Pattern, is_marker, restore, scan};

// ── Strategies ──────────────────────────────────────────────────────────

/// A piece of paragraph content.
#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Emphasis(String),
    Script(String),
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
    prop_oneof![
        3 => "[aAb ]{1,8}".prop_map(Piece::Text),
        2 => "[aAb ]{1,8}".prop_map(Piece::Emphasis),
        1 => "[aAb ]{1,8}".prop_map(Piece::Script),
    ]
}

fn document_strategy() -> impl Strategy<Value = Vec<Vec<Piece>>> {
    prop::collection::vec(prop::collection::vec(piece_strategy(), 1..6), 1..5)
}

fn query_strategy() -> impl Strategy<Value = String> {
    "[aAb]{2,4}"
}

/// Builds a normalized `body` tree.
fn build(paragraphs: &[Vec<Piece>]) -> NodeRef {
    let body = NodeRef::element("body");
    for pieces in paragraphs {
        let p = NodeRef::element("p");
        for piece in pieces {
            match piece {
                Piece::Text(text) => p.append(&NodeRef::text(text.as_str())),
                Piece::Emphasis(text) => p.append(&NodeRef::element("em").with_text(text)),
                Piece::Script(text) => p.append(&NodeRef::element("script").with_text(text)),
            }
        }
        body.append(&p);
    }
    body.normalize();
    body
}

/// Occurrences the scan should find: every text node outside excluded subtrees.
fn expected_count(root: &NodeRef, pattern: &Pattern, settings: &HighlightSettings) -> usize {
    root.descendants()
        .filter(|n| n.is_text())
        .filter(|n| {
            !n.ancestors()
                .any(|a| a.tag().is_some_and(|t| settings.is_excluded_tag(&t)))
        })
        .filter_map(|n| n.text_value())
        .map(|text| pattern.count(&text))
        .sum()
}

fn script_markup(root: &NodeRef) -> Vec<String> {
    root.descendants()
        .filter(|n| n.has_tag("script"))
        .map(|n| to_markup(&n))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scan_then_restore_is_identity(doc in document_strategy(), query in query_strategy()) {
        let settings = HighlightSettings::default();
        let root = build(&doc);
        let before = to_markup(&root);

        let pattern = Pattern::build(&query).unwrap();
        let matches = scan(&root, &pattern, &settings);
        let removed = restore(&root, &settings);

        prop_assert_eq!(removed, matches.len());
        prop_assert_eq!(to_markup(&root), before);
    }

    #[test]
    fn scan_preserves_text(doc in document_strategy(), query in query_strategy()) {
        let settings = HighlightSettings::default();
        let root = build(&doc);
        let before = root.text_content();

        scan(&root, &Pattern::build(&query).unwrap(), &settings);
        prop_assert_eq!(root.text_content(), before);
    }

    #[test]
    fn match_count_is_occurrence_count(doc in document_strategy(), query in query_strategy()) {
        let settings = HighlightSettings::default();
        let root = build(&doc);
        let pattern = Pattern::build(&query).unwrap();
        let expected = expected_count(&root, &pattern, &settings);

        let matches = scan(&root, &pattern, &settings);
        prop_assert_eq!(matches.len(), expected);
        for span in matches.spans() {
            prop_assert!(span.text().eq_ignore_ascii_case(&query));
        }
    }

    #[test]
    fn ordinals_follow_document_order(doc in document_strategy(), query in query_strategy()) {
        let settings = HighlightSettings::default();
        let root = build(&doc);
        let matches = scan(&root, &Pattern::build(&query).unwrap(), &settings);

        let in_tree: Vec<NodeRef> = root
            .descendants()
            .filter(|n| is_marker(n, &settings))
            .collect();
        prop_assert_eq!(in_tree, matches.nodes());
        for (i, span) in matches.spans().iter().enumerate() {
            prop_assert_eq!(span.ordinal(), i);
        }
    }

    #[test]
    fn excluded_subtrees_untouched(doc in document_strategy(), query in query_strategy()) {
        let settings = HighlightSettings::default();
        let root = build(&doc);
        let before = script_markup(&root);

        scan(&root, &Pattern::build(&query).unwrap(), &settings);
        prop_assert_eq!(script_markup(&root), before);
    }
}
