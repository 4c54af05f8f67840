//! Layered configuration for the `hello-verifier` binary.
//!
//! Layers are merged in increasing precedence: built-in defaults, a TOML
//! file, then `HELLO_VERIFIER_*` environment variables. Command-line flags are
//! applied on top by [`crate::cli`].
use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::{HelloVerifierError, Result};
use crate::verification::HELLO_WORLD_CASE;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "HELLO_VERIFIER_";

/// File looked up in the working directory, then its ancestors, when
/// `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "hello_verifier.toml";

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Name reported for the verification case.
    pub case_name: String,
    /// Where to write the JSON result, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_path: Option<Utf8PathBuf>,
    /// Treat skipped verifications as acceptable.
    pub allow_skip: bool,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            case_name: String::from(HELLO_WORLD_CASE),
            result_path: None,
            allow_skip: false,
            log_level: String::from("info"),
        }
    }
}

/// Builds the provider stack without extracting it.
///
/// # Errors
///
/// Returns [`HelloVerifierError::MissingConfig`] when `config_path` names a
/// file that does not exist.
pub fn providers(config_path: Option<&Utf8Path>) -> Result<Figment> {
    let file = match config_path {
        Some(path) if !path.is_file() => {
            return Err(HelloVerifierError::MissingConfig(path.to_owned()));
        }
        Some(path) => Toml::file(path),
        None => Toml::file(DEFAULT_CONFIG_FILE),
    };
    Ok(Figment::from(Serialized::defaults(VerifierConfig::default()))
        .merge(file)
        .merge(Env::prefixed(ENV_PREFIX)))
}

/// Loads and extracts [`VerifierConfig`].
///
/// # Errors
///
/// Returns an error when an explicit file is missing or any layer fails to
/// deserialise.
pub fn load_config(config_path: Option<&Utf8Path>) -> Result<VerifierConfig> {
    Ok(providers(config_path)?.extract()?)
}

#[cfg(test)]
mod tests;
