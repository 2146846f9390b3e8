//! Diagnostic logging setup.
//!
//! Library code logs through the `tracing` macros; the binary installs a
//! stderr subscriber once at startup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Filter directive for a `-v` count: 0 = warn, 1 = debug, 2+ = trace.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "rastervec=debug",
        _ => "rastervec=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag. Subsequent calls are ignored.
pub fn init_logging(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .try_init();
    });
}
