//! Logging setup
//!
//! `RUST_LOG` wins over the level passed in when it is set.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
