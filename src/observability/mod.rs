//! Tracing subscriber setup for hosts, examples, and tests.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! the host's call. This module offers a stderr subscriber suitable for
//! desktop hosts and integration tests.
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. The `default_level` argument
//!
//! # Usage
//!
//! Initialize tracing early in the host lifecycle:
//!
//! ```rust
//! use scriptura::observability::init_tracing;
//!
//! init_tracing("info");
//!
//! tracing::debug!("tracing is now active");
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr tracing subscriber.
///
/// Idempotent: only the first call in a process takes effect, later calls are
/// ignored. `default_level` accepts any `EnvFilter` directive, e.g. `"info"`
/// or `"scriptura=debug"`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::init_tracing;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_tracing("debug");
        init_tracing("info");
    }
}
