//! Log output for applications embedding blockmrf.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs a `tracing` subscriber that prints to stderr.
///
/// The filter is read from `RUST_LOG`; without it, blockmrf crates log at
/// `info`. Safe to call multiple times - only the first call has effect,
/// and it does nothing if another subscriber is already installed.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("blockmrf=info,blockmrf_uai=info,blockmrf_rounding=info")
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
