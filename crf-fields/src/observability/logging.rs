//! Subscriber setup for the engine's `tracing` events.

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` when set and valid, otherwise
/// `default_directive`, otherwise `info`.
#[must_use]
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a global `fmt` subscriber writing to stderr.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_logging(default_directive: &str, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}
