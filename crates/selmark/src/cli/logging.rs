//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter, overriding `-v`.
pub const LOG_ENV: &str = "SELMARK_LOG";

/// Installs the global subscriber.
///
/// Logging stays off unless `-v` is passed or `SELMARK_LOG` is set.
pub fn init(verbose: u8) {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_directive(verbose)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Filter directive for a `-v` count.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "off",
        1 => "selmark_engine=debug,selmark=debug",
        _ => "selmark_engine=trace,selmark=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "off");
        assert!(default_directive(1).contains("debug"));
        assert!(default_directive(5).contains("trace"));
    }
}
