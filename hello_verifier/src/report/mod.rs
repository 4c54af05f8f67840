//! Verification result records consumed by the external harness.
//!
//! Records serialise to the JSON shape the harness merges across runs: a file
//! carries a list of verification results, each with a lower-case status, the
//! elapsed seconds, and the time of the last execution.
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::fs::write_creating_parents;
use crate::verification::{CaseOutcome, CaseState};

/// Outcome of a single verification as reported to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ResultStatus {
    /// The verification passed.
    Success,
    /// The verification failed.
    Failure,
    /// The verification was not performed.
    Skipped,
}

impl ResultStatus {
    /// Lower-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string names no known [`ResultStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown result status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for ResultStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "skipped" => Ok(Self::Skipped),
            _ => Err(ParseStatusError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ResultStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaseState> for ResultStatus {
    fn from(state: CaseState) -> Self {
        if !state.is_terminal() {
            Self::Skipped
        } else if state == CaseState::Passed {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Result of one verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the verification, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_name: Option<String>,
    /// Result status.
    pub status: ResultStatus,
    /// Seconds elapsed while verifying.
    pub elapsed: f64,
    /// Time at which the verification last ran.
    #[serde(default = "Utc::now")]
    pub last_execution_time: DateTime<Utc>,
}

impl VerificationResult {
    /// Builds a record stamped with the current time.
    #[must_use]
    pub fn new(name: Option<String>, status: ResultStatus, elapsed: Duration) -> Self {
        Self {
            verification_name: name,
            status,
            elapsed: elapsed.as_secs_f64(),
            last_execution_time: Utc::now(),
        }
    }

    /// Records a finished verification case.
    #[must_use]
    pub fn from_outcome(name: &str, outcome: &CaseOutcome, elapsed: Duration) -> Self {
        Self::new(Some(name.to_owned()), outcome.state().into(), elapsed)
    }

    /// Returns `true` when the verification failed, was skipped, or ran before
    /// `base_time`.
    #[must_use]
    pub fn need_reverifying(&self, base_time: DateTime<Utc>) -> bool {
        self.status != ResultStatus::Success || self.last_execution_time < base_time
    }
}

/// Results gathered for one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    /// Results of each verification.
    #[serde(default)]
    pub verifications: Vec<VerificationResult>,
    /// Whether the verifications ran on the most recent run.
    #[serde(default = "default_newest")]
    pub newest: bool,
}

const fn default_newest() -> bool {
    true
}

impl Default for FileResult {
    fn default() -> Self {
        Self {
            verifications: Vec::new(),
            newest: default_newest(),
        }
    }
}

impl FileResult {
    /// Wraps a single verification result.
    #[must_use]
    pub fn single(result: VerificationResult) -> Self {
        Self {
            verifications: vec![result],
            ..Self::default()
        }
    }

    /// Returns `true` when the file has no results or any of them needs
    /// reverifying.
    #[must_use]
    pub fn need_verification(&self, base_time: DateTime<Utc>) -> bool {
        self.verifications.is_empty()
            || self
                .verifications
                .iter()
                .any(|result| result.need_reverifying(base_time))
    }

    /// Returns `true` when every verification succeeded.
    ///
    /// With `allow_skip`, skipped verifications count as acceptable and only
    /// failures make the file unsuccessful.
    #[must_use]
    pub fn is_success(&self, allow_skip: bool) -> bool {
        if allow_skip {
            self.verifications
                .iter()
                .all(|result| result.status != ResultStatus::Failure)
        } else {
            self.verifications
                .iter()
                .all(|result| result.status == ResultStatus::Success)
        }
    }
}

/// Writes `result` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialisation fails or the file cannot be written.
pub fn write_result(path: &Utf8Path, result: &FileResult) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(result)?;
    json.push(b'\n');
    write_creating_parents(path, &json)?;
    tracing::debug!(%path, "wrote verification result");
    Ok(())
}
