//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "cloudmap_sync=info";

/// Install a global `tracing` subscriber.
///
/// Honours `RUST_LOG`, falling back to `default_directive`. Calling this
/// more than once is harmless.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
