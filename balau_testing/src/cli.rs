//! Command-line entry point shared by test applications.
//!
//! A test application registers its groups and hands them to [`run_main`],
//! which accepts the arguments the launcher passes:
//! `-e <model> -r <report-dir> [patterns...]`.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;

use crate::error::HarnessError;
use crate::group::TestGroup;
use crate::pattern::Selection;
use crate::report::write_reports;
use crate::runner::{ExecutionModel, RunSummary, run};

/// Arguments accepted by a test application.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(about = "Run the registered test groups")]
pub struct TestAppArgs {
    /// Scheduling of test cases.
    #[arg(short = 'e', long, value_enum, default_value_t = ExecutionModel::SingleThreaded)]
    pub execution_model: ExecutionModel,
    /// Directory receiving one XML report per group.
    #[arg(short = 'r', long, value_name = "DIR")]
    pub report_dir: Option<Utf8PathBuf>,
    /// Glob patterns over `Group::test` names; prefix with `!` to exclude.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
}

/// Runs `groups` as configured by `args`, writing result lines to `out`.
///
/// # Errors
///
/// Returns a [`HarnessError`] when the patterns cannot be compiled or when
/// results or reports cannot be written.
pub fn execute<W: Write>(
    groups: &[TestGroup],
    args: &TestAppArgs,
    out: &mut W,
) -> Result<RunSummary, HarnessError> {
    let selection = Selection::new(&args.patterns)?;
    let summary = run(groups, &selection, args.execution_model);
    summary.write_results(out)?;
    if let Some(dir) = &args.report_dir {
        write_reports(dir, summary.groups())?;
    }
    Ok(summary)
}

/// Parses the process arguments, runs `groups`, and maps the outcome to an
/// exit code: success when every selected case passed, failure otherwise.
#[must_use]
pub fn run_main(groups: &[TestGroup]) -> ExitCode {
    let args = TestAppArgs::parse();
    let mut stdout = io::stdout().lock();
    match execute(groups, &args, &mut stdout) {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            let _unused = writeln!(io::stderr(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}
