//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for test binaries
//! - Configure log level at runtime via `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Output goes through the libtest capture so passing tests stay quiet
//! - Safe to call from every test; only the first call installs a subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "mock_requests=debug,tower_http=debug";

/// Install a global `tracing` subscriber writing through the test harness.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging();
        assert!(!init_logging());
    }
}
