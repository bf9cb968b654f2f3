//! Logging initialisation.
//!
//! The engine emits `tracing` events; these helpers install a
//! `tracing-subscriber` formatter for binaries and tests that embed it.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// Honors `RUST_LOG` (default: `info`), e.g. `RUST_LOG=u_production=debug`.
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Installs a debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
