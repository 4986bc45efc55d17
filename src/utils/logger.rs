//! Logging Infrastructure
//!
//! Structured logging setup driven by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// Defaults to `info` with quiet tower internals when `RUST_LOG` is unset.
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
