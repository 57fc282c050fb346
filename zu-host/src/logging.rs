//! `tracing` subscriber setup for the host binary.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"info"`) is used.
/// Calling this twice is harmless, the second call is ignored.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
