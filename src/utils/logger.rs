use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// The filter is read from `WRAPCALL_LOG`, then `RUST_LOG`, and defaults to
/// `warn`. Calling this more than once is a no-op.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("WRAPCALL_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
