//! Tracing subscriber setup.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppSettings;

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Failure (for
/// example a subscriber already installed) is logged and otherwise ignored.
pub fn init_tracing(settings: &AppSettings) {
    let filter = env_filter(settings.log_filter());
    let result = if settings.json_logs {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };

    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
