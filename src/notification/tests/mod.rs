//! Unit tests for the notification pipeline.

mod notifier_tests;
mod recipient_tests;
mod scheduler_tests;

use tracing_subscriber::EnvFilter;

/// Installs a test subscriber so `RUST_LOG` surfaces pipeline logs.
pub(crate) fn init_tracing() {
    // Ignore the error when another test installed the subscriber first.
    drop(
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init(),
    );
}
