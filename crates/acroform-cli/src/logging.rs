//! Stderr logging for the command-line tools.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`,
/// `acroform_parse=trace`).
pub const LOG_ENV: &str = "ACROFORM_LOG";

/// Default filter. Only errors reach stderr unless `ACROFORM_LOG` says
/// otherwise, so the apply tool's diagnostic line stays alone.
const DEFAULT_FILTER: &str = "error";

/// Install a fmt subscriber writing to stderr.
///
/// Does nothing if a global subscriber is already set.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
