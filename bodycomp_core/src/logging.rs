//! Tracing setup shared by the bodycomp binaries.
//!
//! Everything goes to stderr; stdout belongs to prompts and results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber at `info`
///
/// `RUST_LOG` wins over the default when set.
pub fn init() {
    init_with_level("info")
}

/// Install the global subscriber with a fallback level
///
/// `default_level` is any `EnvFilter` directive (`warn`, `bodycomp_core=debug`, ...)
/// and only applies when `RUST_LOG` is unset or unparsable. Panics if a
/// global subscriber is already installed, so call it once from `main`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route logs through the test harness; safe to call from every test
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
