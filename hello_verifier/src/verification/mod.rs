//! Verification case driving the helper and checking its output.
//!
//! A case starts in [`CaseState::Running`] and settles in either
//! [`CaseState::Passed`] or [`CaseState::Failed`] once [`VerificationCase::run`]
//! compares the accessor's value against the expected literal. Running a
//! case again re-evaluates the accessor from scratch, so repeated runs agree.
use std::borrow::Cow;
use std::fmt;

use crate::error::VerificationError;
use crate::greeting::{HELLO_WORLD, get_hello_world};

/// Name of the canonical case over [`get_hello_world`].
pub const HELLO_WORLD_CASE: &str = "TestHelloWorld";

/// Lifecycle of a verification case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    /// The case has not settled yet.
    Running,
    /// The accessor returned the expected literal.
    Passed,
    /// The accessor returned something else.
    Failed,
}

impl CaseState {
    /// Returns `true` once the case can no longer change state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Short label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
        }
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compares `got` with `want` exactly, without trimming or case folding.
///
/// # Errors
///
/// Returns [`VerificationError::ValueMismatch`] carrying both values when they
/// differ.
///
/// # Examples
///
/// ```rust
/// use hello_verifier::error::VerificationError;
/// use hello_verifier::verification::check;
///
/// assert!(check("Hello World", "Hello World").is_ok());
/// let Err(VerificationError::ValueMismatch { got, .. }) =
///     check("hello world", "Hello World")
/// else {
///     panic!("expected a mismatch");
/// };
/// assert_eq!(got, "hello world");
/// ```
pub fn check(got: &str, want: &str) -> Result<(), VerificationError> {
    if got == want {
        Ok(())
    } else {
        Err(VerificationError::ValueMismatch {
            got: got.to_owned(),
            want: want.to_owned(),
        })
    }
}

/// Terminal result of running a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    state: CaseState,
    mismatch: Option<VerificationError>,
}

impl CaseOutcome {
    fn from_check(result: Result<(), VerificationError>) -> Self {
        let state = if result.is_ok() {
            CaseState::Passed
        } else {
            CaseState::Failed
        };
        Self {
            state,
            mismatch: result.err(),
        }
    }

    /// Returns the terminal state.
    #[must_use]
    pub const fn state(&self) -> CaseState {
        self.state
    }

    /// Returns `true` when the case passed.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self.state, CaseState::Passed)
    }

    /// Returns the mismatch behind a failed case.
    #[must_use]
    pub const fn mismatch(&self) -> Option<&VerificationError> {
        self.mismatch.as_ref()
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`VerificationError`] when the case failed.
    pub fn into_result(self) -> Result<(), VerificationError> {
        self.mismatch.map_or(Ok(()), Err)
    }
}

/// A named check that an accessor returns an expected literal.
pub struct VerificationCase<F> {
    name: Cow<'static, str>,
    want: Cow<'static, str>,
    accessor: F,
    state: CaseState,
}

impl<F> fmt::Debug for VerificationCase<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationCase")
            .field("name", &self.name)
            .field("want", &self.want)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl VerificationCase<fn() -> &'static str> {
    /// Builds the canonical case over [`get_hello_world`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hello_verifier::verification::{CaseState, VerificationCase};
    ///
    /// let mut case = VerificationCase::hello_world();
    /// assert_eq!(case.name(), "TestHelloWorld");
    /// assert_eq!(case.run().state(), CaseState::Passed);
    /// ```
    #[must_use]
    pub fn hello_world() -> Self {
        Self::new(HELLO_WORLD_CASE, HELLO_WORLD, get_hello_world)
    }
}

impl<F, S> VerificationCase<F>
where
    F: Fn() -> S,
    S: AsRef<str>,
{
    /// Creates a case comparing `accessor()` with `want`.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        want: impl Into<Cow<'static, str>>,
        accessor: F,
    ) -> Self {
        Self {
            name: name.into(),
            want: want.into(),
            accessor,
            state: CaseState::Running,
        }
    }

    /// Replaces the display name while keeping the accessor and expectation.
    #[must_use]
    pub fn with_name(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expected literal.
    #[must_use]
    pub fn want(&self) -> &str {
        &self.want
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> CaseState {
        self.state
    }

    /// Calls the accessor once and settles the case.
    pub fn run(&mut self) -> CaseOutcome {
        tracing::debug!(case = %self.name, "running verification case");
        let value = (self.accessor)();
        let outcome = CaseOutcome::from_check(check(value.as_ref(), &self.want));
        self.state = outcome.state();
        if outcome.is_pass() {
            tracing::info!(case = %self.name, "verification case passed");
        } else {
            tracing::warn!(case = %self.name, mismatch = ?outcome.mismatch(), "verification case failed");
        }
        outcome
    }
}
