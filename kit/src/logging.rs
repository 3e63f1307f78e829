//! Tracing setup shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Level used when `RUST_LOG` is unset. Production runs only report problems.
fn default_level(config: &Config) -> &'static str {
    if config.production {
        "warn"
    } else {
        "info"
    }
}

/// Installs the fmt subscriber on stderr. `RUST_LOG` wins when set, so
/// per-file and per-command `debug` lines stay opt-in. Calling this twice is a
/// no-op.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(config)));

    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
