//! Diagnostic logging to stderr.
//!
//! Wallet reports go to stdout; everything else is emitted through
//! `tracing` so it can be filtered with `RUST_LOG`.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
pub fn init() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_only_once() {
        let first: Result<(), TryInitError> = init();
        assert!(first.is_ok());
        assert!(init().is_err());
        tracing::debug!("logging initialized");
    }
}
