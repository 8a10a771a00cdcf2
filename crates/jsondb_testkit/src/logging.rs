//! Logging setup for tests.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a `tracing` subscriber writing to the test harness' captured
/// output. Honors `RUST_LOG`, defaulting to `jsondb=debug`.
///
/// Safe to call from every test; only the first call has an effect.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jsondb=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
