//! Error types for the `hello_verifier` crate.
//!
//! `VerificationError` is the only failure a verification case can produce and
//! is reported as an outcome rather than propagated. `HelloVerifierError`
//! covers the configuration, filesystem, and serialisation failures that stop
//! the binary before a verdict exists.
use camino::Utf8PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = HelloVerifierError> = std::result::Result<T, E>;

/// Failure raised when a verification case observes the wrong value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The accessor returned something other than the expected literal.
    #[error("got {got:?}, want {want:?}")]
    ValueMismatch {
        /// Value produced by the accessor.
        got: String,
        /// Literal the case expected.
        want: String,
    },
}

/// Errors raised by the hello verifier library and binary.
#[derive(Debug, Error)]
pub enum HelloVerifierError {
    /// Wraps configuration parsing failures from `figment`.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Box<figment::Error>),
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingConfig(Utf8PathBuf),
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    /// A result record could not be serialised.
    #[error("failed to serialise verification result: {0}")]
    Serialise(#[from] serde_json::Error),
    /// The `tracing` subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<figment::Error> for HelloVerifierError {
    fn from(err: figment::Error) -> Self {
        Self::Configuration(Box::new(err))
    }
}

impl HelloVerifierError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
