//! Log output for the `hupoker` binary.
//!
//! Engine and AI events go to stderr so they never mix with command output.
//! `RUST_LOG` selects what is shown, e.g. `RUST_LOG=hupoker_engine=debug`
//! traces every action of every hand.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global fmt subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}
