//! Error types for the test-group harness.
//!
//! [`TestFailure`] describes why a single test case did not pass and is
//! reported per case. [`HarnessError`] covers failures of the harness itself,
//! such as an unwritable report directory, which abort the run.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Outcome type returned by registered test methods.
pub type TestResult = Result<(), TestFailure>;

/// Reasons a single test case failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestFailure {
    /// The actual value differed from the expected literal.
    #[error("expected {expected:?} but was {actual:?} (first difference at byte {offset})")]
    Mismatch {
        /// Expected value, rendered for display.
        expected: String,
        /// Observed value, rendered for display.
        actual: String,
        /// Byte offset of the first differing byte.
        offset: usize,
    },
    /// The test body panicked.
    #[error("panicked: {0}")]
    Panicked(String),
    /// The test reported a failure of its own, such as an I/O error.
    #[error("{0}")]
    Message(String),
}

impl From<std::io::Error> for TestFailure {
    fn from(err: std::io::Error) -> Self {
        Self::Message(err.to_string())
    }
}

/// Errors raised while registering or executing test groups.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A case name was registered twice within one group.
    #[error("test '{case}' is already registered in group '{group}'")]
    DuplicateTest {
        /// Owning group.
        group: String,
        /// Offending case name.
        case: String,
    },

    /// Test name patterns could not be compiled.
    #[error("invalid test name patterns '{patterns}': {source}")]
    InvalidPattern {
        /// The offending patterns, space separated.
        patterns: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Writing results or reports failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written when the failure occurred.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing result lines to the output sink failed.
    #[error("failed to write test output: {0}")]
    Output(#[source] std::io::Error),
}
