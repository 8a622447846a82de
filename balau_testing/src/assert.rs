//! Exact-equality assertions for test methods.
//!
//! Comparison is byte-for-byte: no whitespace trimming and no line-ending
//! normalisation, so a missing trailing newline is a failure.
//!
//! # Examples
//!
//! ```
//! use balau_testing::assert::{assert_that, is};
//!
//! assert!(assert_that("Hello\n", is("Hello\n")).is_ok());
//! assert!(assert_that("Hello", is("Hello\n")).is_err());
//! ```

use crate::error::{TestFailure, TestResult};

/// Matcher requiring the actual value to equal `expected` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Is<'a> {
    expected: &'a str,
}

impl<'a> Is<'a> {
    /// Returns the literal this matcher compares against.
    #[must_use]
    pub const fn expected(&self) -> &'a str {
        self.expected
    }

    fn check(&self, actual: &str) -> TestResult {
        match first_difference(self.expected.as_bytes(), actual.as_bytes()) {
            None => Ok(()),
            Some(offset) => Err(TestFailure::Mismatch {
                expected: self.expected.to_owned(),
                actual: actual.to_owned(),
                offset,
            }),
        }
    }
}

/// Builds an exact-equality matcher.
#[must_use]
pub const fn is(expected: &str) -> Is<'_> {
    Is { expected }
}

/// Checks `actual` against `matcher`.
///
/// # Errors
///
/// Returns [`TestFailure::Mismatch`] when the values differ in any byte,
/// including length.
pub fn assert_that(actual: impl AsRef<str>, matcher: Is<'_>) -> TestResult {
    matcher.check(actual.as_ref())
}

fn first_difference(expected: &[u8], actual: &[u8]) -> Option<usize> {
    let shared = expected
        .iter()
        .zip(actual)
        .position(|(left, right)| left != right);
    match shared {
        Some(offset) => Some(offset),
        None if expected.len() == actual.len() => None,
        None => Some(expected.len().min(actual.len())),
    }
}
