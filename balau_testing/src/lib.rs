//! Test-group harness for Balau-style unit test applications.
//!
//! Applications build [`TestGroup`]s of test methods, then hand them to
//! [`cli::run_main`]. Cases are selected by glob patterns over
//! `Group::test` names, executed under an [`ExecutionModel`], reported as one
//! result line each and, optionally, as one JUnit-style XML file per group.

pub mod assert;
pub mod cli;
pub mod error;
pub mod group;
pub mod pattern;
pub mod report;
pub mod runner;

pub use error::{HarnessError, TestFailure, TestResult};
pub use group::{TestCase, TestGroup};
pub use runner::{ExecutionModel, RunSummary};
