//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod find;
pub mod init;
pub mod inspect;
pub mod replay;
mod shared;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Find(cmd) => find::run(ctx, &cmd),
        Commands::Replay(cmd) => replay::run(ctx, &cmd),
        Commands::Inspect(cmd) => inspect::run(&cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
