//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use selmark_config::HighlightSettings;
use selmark_document::NodeRef;
use selmark_engine::{EngineEvent, LaidOutHost, MatchSet};
pub use selmark_highlight::{dim, header, subheader, warning};
use selmark_highlight::{MarkClasses, render_marked};
use serde::Serialize;

use crate::cli::page::line_of;

/// One match in JSON and table output.
#[derive(Debug, Serialize)]
pub struct MatchRow {
    /// One-based position in document order.
    pub position: usize,
    /// Matched text as it appears in the document.
    pub text: String,
    /// One-based document line.
    pub line: Option<usize>,
    /// Whether this is the active match.
    pub active: bool,
}

/// JSON output for `selmark find`.
#[derive(Debug, Serialize)]
pub struct FindOutput {
    /// Searched file.
    pub file: String,
    /// Trimmed selection that was searched for.
    pub query: String,
    /// Number of matches.
    pub total: usize,
    /// One-based active position.
    pub current: Option<usize>,
    /// Position label.
    pub label: Option<String>,
    /// Every match in document order.
    pub matches: Vec<MatchRow>,
}

/// One emitted event in `selmark replay` output.
#[derive(Debug, Serialize)]
pub struct EventRow {
    /// Script line that caused the event.
    pub line: usize,
    /// Clock reading in milliseconds.
    pub at_ms: u128,
    /// `"changed"` or `"cleared"`.
    pub kind: &'static str,
    /// One-based active position.
    pub current: Option<usize>,
    /// Number of matches.
    pub total: usize,
    /// Position label.
    pub label: Option<String>,
}

impl EventRow {
    /// Builds a row from an engine event.
    pub fn new(line: usize, at_ms: u128, event: &EngineEvent) -> Self {
        let (kind, current, total) = match *event {
            EngineEvent::MatchSetChanged { current, total } => ("changed", Some(current + 1), total),
            EngineEvent::Cleared => ("cleared", None, 0),
        };
        Self {
            line,
            at_ms,
            kind,
            current,
            total,
            label: event.label(),
        }
    }

    /// Human-readable form.
    pub fn describe(&self) -> String {
        let what = self.label.clone().unwrap_or_else(|| "cleared".to_string());
        format!("{:>6}ms  line {:<3} {what}", self.at_ms, self.line)
    }
}

/// Collects table/JSON rows for the current matches.
pub fn match_rows(matches: &MatchSet, host: &LaidOutHost) -> Vec<MatchRow> {
    matches
        .spans()
        .iter()
        .map(|span| MatchRow {
            position: span.ordinal() + 1,
            text: span.text(),
            line: line_of(host, span.node()),
            active: span.is_active(),
        })
        .collect()
}

/// Prints match rows as a table.
pub fn print_match_table(rows: &[MatchRow]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Line", "Text", "Active"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.position.to_string()),
            Cell::new(row.line.map_or_else(|| "-".to_string(), |l| l.to_string())),
            Cell::new(&row.text),
            Cell::new(if row.active { "*" } else { "" }),
        ]);
    }
    println!("{table}");
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders a marked body for the terminal.
pub fn marked_document(body: &NodeRef, settings: &HighlightSettings, color: bool) -> String {
    let classes = MarkClasses {
        marker: &settings.marker_class,
        active: &settings.active_class,
    };
    render_marked(body, classes, color)
}

/// Whether to emit ANSI colors.
pub fn use_color(no_color: bool) -> bool {
    !no_color && io::stdout().is_terminal()
}
