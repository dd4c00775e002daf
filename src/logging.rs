//! Tracing subscriber setup.
//!
//! Diagnostics from the renderers (missing display names, duplicated grid
//! rows, unsupported qualifying formats) are emitted through `tracing`. Hosts
//! that do not install their own subscriber can call [`init`].

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "F1_RESULTS_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a global fmt subscriber, returning an error if one is already set.
pub fn try_init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).with_target(true).try_init()
}

/// Install a global fmt subscriber, ignoring an already installed one.
pub fn init() {
    let _ = try_init();
}
