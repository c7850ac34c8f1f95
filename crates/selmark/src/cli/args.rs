//! Clap argument definitions for the `selmark` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Viewport height used when none is given, in lines.
pub const DEFAULT_VIEWPORT_LINES: usize = 24;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "selmark")]
#[command(about = "Selection highlighter - mark and step through every occurrence of a selection")]
pub struct Cli {
    /// Log engine activity to stderr (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output a table of matches instead of the marked document
    #[arg(long)]
    pub list: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Never use ANSI colors, bracketing matches instead
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for `selmark find`.
#[derive(Args, Debug, Clone)]
pub struct FindCommand {
    /// Document to search (.md, .markdown or .txt)
    pub file: PathBuf,

    /// Text to select, matched exactly against the rendered document
    #[arg(short = 's', long)]
    pub select: String,

    /// Which occurrence of the selected text to select, counting from 1
    #[arg(short = 'o', long, default_value = "1")]
    pub occurrence: usize,

    /// Steps to take after selecting; negative values step backwards
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub step: isize,

    /// Viewport height in lines [default: 24]
    #[arg(long)]
    pub viewport: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `selmark replay`.
#[derive(Args, Debug, Clone)]
pub struct ReplayCommand {
    /// Document to replay against (.md, .markdown or .txt)
    pub file: PathBuf,

    /// Event script, one event per line
    pub script: PathBuf,

    /// Viewport height in lines [default: 24]
    #[arg(long)]
    pub viewport: Option<usize>,

    /// Print the marked document after the script finishes
    #[arg(long)]
    pub show: bool,

    /// Output events in JSON format
    #[arg(long)]
    pub json: bool,

    /// Never use ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for `selmark inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// Document to inspect
    pub file: PathBuf,

    /// Print the tree as a single line of markup instead of an outline
    #[arg(long)]
    pub markup: bool,
}

/// Arguments for `selmark init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.selmark.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `selmark` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Select text in a document and mark every occurrence
    #[command(after_help = "\
EXAMPLES:
  selmark find notes.md --select cat
  selmark find notes.md --select cat --occurrence 3 --step 1
  selmark find notes.md --select 'error handling' --list
  selmark find notes.txt --select cat --json")]
    Find(FindCommand),

    /// Replay a script of input events against a document
    #[command(after_help = "\
SCRIPT EVENTS:
  down [bar]          Press the primary button (on the control bar with 'bar')
  up [bar]            Release the primary button
  select TEXT [N]     Select the Nth occurrence of TEXT (quote TEXT to keep spaces)
  select-bar          Select the text of the control bar
  deselect            Clear the selection
  wait MS             Let MS milliseconds pass, firing the debounce timer if due
  next | prev         Step to the next or previous match
  clear               Remove all marks

Lines starting with # are comments.")]
    Replay(ReplayCommand),

    /// Show how a document is parsed into a tree
    Inspect(InspectCommand),

    /// Initialize selmark configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    /// Verifies that CLI help text contains the correct default values.
    #[test]
    fn cli_help_defaults_match_constants() {
        let cmd = Cli::command();
        for subcmd in ["find", "replay"] {
            let help = get_arg_help(&cmd, subcmd, "viewport");
            assert!(
                help.contains(&format!("[default: {DEFAULT_VIEWPORT_LINES}]")),
                "{subcmd} --viewport help should contain default {DEFAULT_VIEWPORT_LINES}: {help}"
            );
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn find_accepts_negative_steps() {
        let cli = Cli::try_parse_from([
            "selmark", "find", "a.md", "--select", "cat", "--step", "-2",
        ])
        .unwrap();
        let Commands::Find(cmd) = cli.command else {
            panic!("expected find");
        };
        assert_eq!(cmd.step, -2);
        assert_eq!(cmd.occurrence, 1);
        assert_eq!(cmd.select, "cat");
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["selmark", "config", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
