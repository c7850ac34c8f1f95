//! Implementation of `selmark check`.

use std::process::ExitCode;

use selmark_config::{Config, ConfigWarning, discover_config_files};
use selmark_highlight::{success, warning};

use crate::cli::context::CommandContext;

/// Exit codes for `selmark check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports issues.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run 'selmark init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("Config files:");
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = match Config::load(&ctx.cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };

    println!("Marker:");
    println!(
        "  <{} class=\"{}\">, active class \"{}\"",
        config.highlight.marker_tag, config.highlight.marker_class, config.highlight.active_class
    );
    println!(
        "  debounce {}ms, minimum selection {} characters",
        config.trigger.debounce_ms, config.highlight.min_query_len
    );
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return exit_codes::OK;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for item in &warnings {
        println!("  - {item}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::ScrollFractionOutOfRange { .. } => {
                "Set navigation.scroll_fraction between 0.0 (top) and 1.0 (bottom)."
            }
            ConfigWarning::MinQueryLenZero => {
                "Set highlight.min_query_len to at least 1; 2 ignores stray single characters."
            }
            ConfigWarning::ActiveClassMatchesMarker { .. } => {
                "Give highlight.active_class a name distinct from highlight.marker_class."
            }
            ConfigWarning::EmptyMarkerName { .. } => {
                "Remove the empty setting to fall back to the default name."
            }
            ConfigWarning::DebounceDisabled => {
                "Set trigger.debounce_ms to around 150 to coalesce rapid selection changes."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("Hints:");
        for hint in hints {
            println!("  - {hint}");
        }
    }
}
