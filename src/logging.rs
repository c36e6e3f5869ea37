//! Diagnostic logging to stderr via `tracing`.
//!
//! Reports go to stdout; everything emitted here goes to stderr so the two
//! can be separated.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v`/`-q` count (positive is louder).
pub fn default_directive(verbosity: i8) -> String {
    let level = match verbosity {
        i8::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("dc_inventory={level}")
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `verbosity`. Calling it twice is a no-op.
pub fn init(verbosity: i8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
