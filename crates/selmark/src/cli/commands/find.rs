//! Implementation of `selmark find`.

use std::process::ExitCode;

use selmark_engine::{InputEvent, MouseButton, SystemClock};

use super::shared::{load_document, viewport_lines};
use crate::cli::{
    args::FindCommand,
    context::CommandContext,
    output::{
        FindOutput, dim, header, marked_document, match_rows, print_json, print_match_table,
        use_color, warning,
    },
    page::Page,
};

/// Selects text in a document and shows the marked result.
pub fn run(ctx: &CommandContext, cmd: &FindCommand) -> ExitCode {
    if cmd.occurrence == 0 {
        eprintln!("error: --occurrence counts from 1");
        return ExitCode::FAILURE;
    }
    let document = match load_document(&cmd.file) {
        Ok(doc) => doc,
        Err(code) => return code,
    };

    let config = &ctx.config;
    let page = Page::new(&document);
    let mut session = page.session(config, SystemClock::new(), viewport_lines(cmd.viewport));

    session.handle(InputEvent::MouseDown {
        button: MouseButton::Primary,
        target: None,
    });
    if !session
        .host_mut()
        .select_occurrence(&cmd.select, cmd.occurrence - 1)
    {
        eprintln!(
            "error: occurrence {} of {:?} not found in {}",
            cmd.occurrence,
            cmd.select,
            cmd.file.display()
        );
        return ExitCode::FAILURE;
    }
    session.handle(InputEvent::SelectionChanged);
    session.handle(InputEvent::MouseUp {
        button: MouseButton::Primary,
        target: None,
    });

    for _ in 0..cmd.step.unsigned_abs() {
        if cmd.step > 0 {
            session.step_next();
        } else {
            session.step_previous();
        }
    }

    let query = cmd.select.trim();
    let min_len = config.highlight.min_query_len;
    if query.chars().count() < min_len {
        eprintln!(
            "{}",
            warning(&format!(
                "selection is shorter than {min_len} characters; nothing marked"
            ))
        );
    }

    let rows = match_rows(session.matches(), session.host());
    let label = page.label();

    if cmd.output.json {
        let output = FindOutput {
            file: cmd.file.display().to_string(),
            query: query.to_string(),
            total: rows.len(),
            current: session.navigation().current().map(|i| i + 1),
            label: (!label.is_empty()).then(|| label.clone()),
            matches: rows,
        };
        return print_json(&output);
    }

    let color = use_color(cmd.output.no_color);
    if cmd.output.list {
        if !rows.is_empty() {
            print_match_table(&rows);
        }
    } else {
        println!("{}", marked_document(&page.body, &config.highlight, color));
        println!();
    }

    if label.is_empty() {
        println!("{}", if color { dim("No matches.") } else { "No matches.".to_string() });
    } else if color {
        println!("{}", header(&label));
    } else {
        println!("{label}");
    }

    ExitCode::SUCCESS
}
