//! CLI support for the `selmark` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;
pub mod page;
pub mod script;

pub use context::CommandContext;
