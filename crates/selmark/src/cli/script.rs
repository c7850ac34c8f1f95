//! Event scripts for `selmark replay`.

use std::{fmt, time::Duration};

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Primary button pressed; `on_bar` targets the control bar.
    Down {
        /// Whether the press lands on the control bar.
        on_bar: bool,
    },
    /// Primary button released.
    Up {
        /// Whether the release lands on the control bar.
        on_bar: bool,
    },
    /// Select an occurrence of some text.
    Select {
        /// Text to select, matched exactly.
        text: String,
        /// One-based occurrence.
        occurrence: usize,
    },
    /// Select the control bar's label.
    SelectBar,
    /// Clear the selection.
    Deselect,
    /// Let time pass.
    Wait(Duration),
    /// Step forward.
    Next,
    /// Step backward.
    Prev,
    /// Remove all marks.
    Clear,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = |on_bar: bool| if on_bar { " bar" } else { "" };
        match self {
            Self::Down { on_bar } => write!(f, "down{}", bar(*on_bar)),
            Self::Up { on_bar } => write!(f, "up{}", bar(*on_bar)),
            Self::Select { text, occurrence } => write!(f, "select {text:?} {occurrence}"),
            Self::SelectBar => write!(f, "select-bar"),
            Self::Deselect => write!(f, "deselect"),
            Self::Wait(d) => write!(f, "wait {}", d.as_millis()),
            Self::Next => write!(f, "next"),
            Self::Prev => write!(f, "prev"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// One-based line number.
    pub line: usize,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Parses a whole script, returning each step with its line number.
pub fn parse_script(source: &str) -> Result<Vec<(usize, Step)>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(line).map_err(|message| ScriptError {
            line: index + 1,
            message,
        })?;
        steps.push((index + 1, step));
    }
    Ok(steps)
}

/// Parses one non-empty, non-comment line.
fn parse_step(line: &str) -> Result<Step, String> {
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));
    match verb {
        "down" => Ok(Step::Down {
            on_bar: parse_target(rest)?,
        }),
        "up" => Ok(Step::Up {
            on_bar: parse_target(rest)?,
        }),
        "select" => parse_select(rest),
        "select-bar" => no_args(verb, rest, Step::SelectBar),
        "deselect" => no_args(verb, rest, Step::Deselect),
        "wait" => rest
            .parse::<u64>()
            .map(|ms| Step::Wait(Duration::from_millis(ms)))
            .map_err(|_| format!("wait needs a millisecond count, got {rest:?}")),
        "next" => no_args(verb, rest, Step::Next),
        "prev" => no_args(verb, rest, Step::Prev),
        "clear" => no_args(verb, rest, Step::Clear),
        _ => Err(format!("unknown event {verb:?}")),
    }
}

/// Parses the optional `bar` target of `down`/`up`.
fn parse_target(rest: &str) -> Result<bool, String> {
    match rest {
        "" => Ok(false),
        "bar" => Ok(true),
        other => Err(format!("unknown target {other:?}, expected 'bar'")),
    }
}

/// Rejects trailing arguments.
fn no_args(verb: &str, rest: &str, step: Step) -> Result<Step, String> {
    if rest.is_empty() {
        Ok(step)
    } else {
        Err(format!("{verb} takes no arguments"))
    }
}

/// Parses `select TEXT [N]` or `select "TEXT" [N]`.
fn parse_select(rest: &str) -> Result<Step, String> {
    let (text, occurrence) = if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted
            .find('"')
            .ok_or_else(|| "unterminated quote".to_string())?;
        (&quoted[..end], quoted[end + 1..].trim())
    } else {
        match rest.rsplit_once(char::is_whitespace) {
            Some((text, last)) if last.parse::<usize>().is_ok() => (text.trim(), last),
            _ => (rest, ""),
        }
    };
    if text.is_empty() {
        return Err("select needs text".to_string());
    }
    let occurrence = if occurrence.is_empty() {
        1
    } else {
        occurrence
            .parse::<usize>()
            .map_err(|_| format!("bad occurrence {occurrence:?}"))?
    };
    if occurrence == 0 {
        return Err("occurrences count from 1".to_string());
    }
    Ok(Step::Select {
        text: text.to_string(),
        occurrence,
    })
}
