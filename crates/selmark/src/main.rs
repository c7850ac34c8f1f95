//! Command-line interface for selmark.

use std::process::ExitCode;

use selmark::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) | Commands::Inspect(_) | Commands::Check => {
            CommandContext::load_cwd_only()
        }
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
