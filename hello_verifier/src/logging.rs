//! Structured logging via `tracing`.
//!
//! Events go to standard error so standard output only carries verification
//! results. `RUST_LOG` takes precedence over the configured level.
use tracing_subscriber::EnvFilter;

use crate::error::{HelloVerifierError, Result};

/// Builds the event filter, preferring `RUST_LOG` over `level`.
///
/// # Errors
///
/// Returns [`HelloVerifierError::Logging`] when `level` is not a valid filter
/// directive.
pub fn filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| HelloVerifierError::Logging(err.to_string()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`HelloVerifierError::Logging`] when the filter is invalid or a
/// subscriber is already installed.
pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| HelloVerifierError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("info")]
    #[case("hello_verifier=debug,warn")]
    fn accepts_valid_levels(#[case] level: &str) {
        // RUST_LOG may be set by the runner; either source must parse.
        assert!(filter(level).is_ok());
    }
}
