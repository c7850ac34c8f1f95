//! Implementation of `selmark replay`.

use std::{
    cell::{Cell, RefCell},
    fs,
    process::ExitCode,
    rc::Rc,
    time::Duration,
};

use selmark_engine::{Clock, Coordinator, InputEvent, LaidOutHost, ManualClock, MouseButton};
use tracing::debug;

use super::shared::{load_document, viewport_lines};
use crate::cli::{
    args::ReplayCommand,
    context::CommandContext,
    output::{EventRow, dim, marked_document, print_json, subheader, use_color},
    page::Page,
    script::{Step, parse_script},
};

/// Runs an event script against a document on a manual clock.
pub fn run(ctx: &CommandContext, cmd: &ReplayCommand) -> ExitCode {
    let source = match fs::read_to_string(&cmd.script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", cmd.script.display());
            return ExitCode::FAILURE;
        }
    };
    let steps = match parse_script(&source) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("error: {}:{}: {}", cmd.script.display(), e.line, e.message);
            return ExitCode::FAILURE;
        }
    };
    let document = match load_document(&cmd.file) {
        Ok(doc) => doc,
        Err(code) => return code,
    };

    let page = Page::new(&document);
    let clock = ManualClock::new();
    let mut session = page.session(&ctx.config, clock.clone(), viewport_lines(cmd.viewport));

    let current_line = Rc::new(Cell::new(0));
    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let current_line = Rc::clone(&current_line);
        let log = Rc::clone(&log);
        let clock = clock.clone();
        session.subscribe(move |event| {
            log.borrow_mut().push(EventRow::new(
                current_line.get(),
                clock.now().as_millis(),
                event,
            ));
        });
    }

    for (line, step) in &steps {
        current_line.set(*line);
        debug!(line, %step, "replay step");
        if let Err(message) = apply(&mut session, &page, &clock, step) {
            eprintln!("error: {}:{line}: {message}", cmd.script.display());
            return ExitCode::FAILURE;
        }
    }

    let rows = log.take();
    if cmd.json {
        return print_json(&rows);
    }

    let color = use_color(cmd.no_color);
    if rows.is_empty() {
        println!("{}", if color { dim("No events.") } else { "No events.".to_string() });
    }
    for row in &rows {
        println!("{}", row.describe());
    }

    if cmd.show {
        println!();
        let heading = format!("{} after {} steps", cmd.file.display(), steps.len());
        println!("{}", if color { subheader(&heading) } else { heading });
        println!(
            "{}",
            marked_document(&page.body, &ctx.config.highlight, color)
        );
    }

    ExitCode::SUCCESS
}

/// Feeds one scripted step to the session.
fn apply(
    session: &mut Coordinator<LaidOutHost, ManualClock>,
    page: &Page,
    clock: &ManualClock,
    step: &Step,
) -> Result<(), String> {
    let target = |on_bar: bool| if on_bar { page.label_element() } else { None };
    match step {
        Step::Down { on_bar } => session.handle(InputEvent::MouseDown {
            button: MouseButton::Primary,
            target: target(*on_bar),
        }),
        Step::Up { on_bar } => session.handle(InputEvent::MouseUp {
            button: MouseButton::Primary,
            target: target(*on_bar),
        }),
        Step::Select { text, occurrence } => {
            if !session.host_mut().select_occurrence(text, occurrence - 1) {
                return Err(format!("occurrence {occurrence} of {text:?} not found"));
            }
            session.handle(InputEvent::SelectionChanged);
        }
        Step::SelectBar => {
            let Some(label) = page.label_element() else {
                return Err("control bar has no label".to_string());
            };
            session.host_mut().select_node(&label);
            session.handle(InputEvent::SelectionChanged);
        }
        Step::Deselect => {
            session.host_mut().deselect();
            session.handle(InputEvent::SelectionChanged);
        }
        Step::Wait(by) => wait(session, clock, *by),
        Step::Next => session.step_next(),
        Step::Prev => session.step_previous(),
        Step::Clear => session.clear_all(),
    }
    Ok(())
}

/// Advances the clock by `by`, firing each deadline that falls inside the wait at its own time.
fn wait(session: &mut Coordinator<LaidOutHost, ManualClock>, clock: &ManualClock, by: Duration) {
    let end = clock.now() + by;
    while let Some(deadline) = session.next_deadline() {
        if deadline > end {
            break;
        }
        clock.set(deadline.max(clock.now()));
        session.poll();
        if session.next_deadline() == Some(deadline) {
            break;
        }
    }
    clock.set(end);
}
