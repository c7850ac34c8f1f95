//! Implementation of `selmark config`.

use std::process::ExitCode;

use selmark_highlight::{Highlighter, dim, rule};

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    match &config.config_root {
        Some(root) => println!("{}", dim(&format!("# root: {}", root.display()))),
        None => println!("{}", dim("# defaults")),
    }
    print!(
        "{}",
        Highlighter::new().highlight_toml(&config.settings_to_toml())
    );
    println!("{}", rule(40));
    ExitCode::SUCCESS
}
