//! tracing-subscriber initialisation.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,bsdflags=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing
/// one is kept.
pub fn init_logging(debug: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
}
