//! Executes selected test cases and collects their outcomes.

use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use clap::ValueEnum;

use crate::error::{HarnessError, TestFailure};
use crate::group::{TestCase, TestGroup};
use crate::pattern::Selection;

/// How the harness schedules test cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExecutionModel {
    /// Run every case on the calling thread in registration order.
    #[default]
    #[value(name = "SingleThreaded")]
    SingleThreaded,
    /// Run each group on its own scoped worker thread.
    #[value(name = "WorkerThreads")]
    WorkerThreads,
}

impl ExecutionModel {
    /// Returns the name accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleThreaded => "SingleThreaded",
            Self::WorkerThreads => "WorkerThreads",
        }
    }
}

/// Result of one executed case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    name: String,
    elapsed: Duration,
    failure: Option<TestFailure>,
}

impl CaseOutcome {
    /// Registered case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wall-clock time spent in the case.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Failure details, or `None` when the case passed.
    #[must_use]
    pub const fn failure(&self) -> Option<&TestFailure> {
        self.failure.as_ref()
    }

    /// Returns whether the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Outcomes of the selected cases of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    name: String,
    cases: Vec<CaseOutcome>,
}

impl GroupOutcome {
    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executed cases in registration order.
    #[must_use]
    pub fn cases(&self) -> &[CaseOutcome] {
        &self.cases
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|case| !case.passed()).count()
    }

    /// Total time spent in the group's cases.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.cases.iter().map(CaseOutcome::elapsed).sum()
    }
}

/// Outcomes of a whole run. Groups with no selected case are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    groups: Vec<GroupOutcome>,
}

impl RunSummary {
    /// Per-group outcomes in registration order.
    #[must_use]
    pub fn groups(&self) -> &[GroupOutcome] {
        &self.groups
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.executed() - self.failed()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.groups.iter().map(GroupOutcome::failed).sum()
    }

    /// Number of executed cases.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.groups.iter().map(|group| group.cases.len()).sum()
    }

    /// Returns whether every executed case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Writes one line per case followed by a totals line.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Output`] when the sink rejects a write.
    pub fn write_results<W: Write>(&self, out: &mut W) -> Result<(), HarnessError> {
        for group in &self.groups {
            for case in &group.cases {
                let written = match &case.failure {
                    None => writeln!(out, "{}::{} - PASSED", group.name, case.name),
                    Some(failure) => {
                        writeln!(out, "{}::{} - FAILED: {failure}", group.name, case.name)
                    }
                };
                written.map_err(HarnessError::Output)?;
            }
        }
        writeln!(out, "{} passed, {} failed", self.passed(), self.failed())
            .map_err(HarnessError::Output)
    }
}

/// Runs the cases of `groups` selected by `selection`.
///
/// # Examples
///
/// ```
/// use balau_testing::group::TestGroup;
/// use balau_testing::pattern::Selection;
/// use balau_testing::runner::{ExecutionModel, run};
///
/// fn passes() -> balau_testing::TestResult {
///     Ok(())
/// }
///
/// let groups = vec![TestGroup::new("LibTest").register("test", passes)?];
/// let summary = run(&groups, &Selection::new(["*Test::*"])?, ExecutionModel::SingleThreaded);
/// assert!(summary.all_passed());
/// assert_eq!(summary.executed(), 1);
/// # Ok::<(), balau_testing::HarnessError>(())
/// ```
#[must_use]
pub fn run(groups: &[TestGroup], selection: &Selection, model: ExecutionModel) -> RunSummary {
    let outcomes: Vec<GroupOutcome> = match model {
        ExecutionModel::SingleThreaded => groups
            .iter()
            .map(|group| run_group(group, selection))
            .collect(),
        ExecutionModel::WorkerThreads => run_on_workers(groups, selection),
    };
    RunSummary {
        groups: outcomes
            .into_iter()
            .filter(|group| !group.cases.is_empty())
            .collect(),
    }
}

fn run_on_workers(groups: &[TestGroup], selection: &Selection) -> Vec<GroupOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = groups
            .iter()
            .map(|group| (group, scope.spawn(move || run_group(group, selection))))
            .collect();
        handles
            .into_iter()
            .map(|(group, handle)| {
                handle.join().unwrap_or_else(|payload| GroupOutcome {
                    name: group.name().to_owned(),
                    cases: vec![CaseOutcome {
                        name: String::from("<worker>"),
                        elapsed: Duration::ZERO,
                        failure: Some(TestFailure::Panicked(panic_message(&*payload))),
                    }],
                })
            })
            .collect()
    })
}

fn run_group(group: &TestGroup, selection: &Selection) -> GroupOutcome {
    let cases = group
        .cases()
        .iter()
        .filter(|case| selection.selects(&case.qualified_name()))
        .map(run_case)
        .collect();
    GroupOutcome {
        name: group.name().to_owned(),
        cases,
    }
}

fn run_case(case: &TestCase) -> CaseOutcome {
    tracing::debug!(test = %case.qualified_name(), "running test");
    let started = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| case.run()));
    let elapsed = started.elapsed();
    let failure = match result {
        Ok(Ok(())) => None,
        Ok(Err(failure)) => Some(failure),
        Err(payload) => Some(TestFailure::Panicked(panic_message(&*payload))),
    };
    CaseOutcome {
        name: case.name().to_owned(),
        elapsed,
        failure,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    String::from("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestResult;
    use rstest::{fixture, rstest};

    fn passes() -> TestResult {
        Ok(())
    }

    fn fails() -> TestResult {
        Err(TestFailure::Message(String::from("boom")))
    }

    fn panics() -> TestResult {
        panic!("exploded")
    }

    #[fixture]
    fn groups() -> Vec<TestGroup> {
        vec![
            TestGroup::new("LibTest")
                .register("test", passes)
                .and_then(|group| group.register("broken", fails))
                .expect("register LibTest"),
            TestGroup::new("LibIT")
                .register("test", passes)
                .expect("register LibIT"),
        ]
    }

    #[rstest]
    #[case(ExecutionModel::SingleThreaded)]
    #[case(ExecutionModel::WorkerThreads)]
    fn default_pattern_skips_integration_groups(
        groups: Vec<TestGroup>,
        #[case] model: ExecutionModel,
    ) {
        let selection = Selection::new(["*Test::*"]).expect("compile patterns");
        let summary = run(&groups, &selection, model);
        let names: Vec<&str> = summary.groups().iter().map(GroupOutcome::name).collect();
        assert_eq!(names, vec!["LibTest"]);
        assert_eq!(summary.executed(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
    }

    #[rstest]
    fn worker_threads_preserve_group_order(groups: Vec<TestGroup>) {
        let summary = run(
            &groups,
            &Selection::new(["!*::broken"]).expect("compile patterns"),
            ExecutionModel::WorkerThreads,
        );
        let names: Vec<&str> = summary.groups().iter().map(GroupOutcome::name).collect();
        assert_eq!(names, vec!["LibTest", "LibIT"]);
        assert!(summary.all_passed());
    }

    #[rstest]
    fn panics_become_failures() {
        let groups = vec![
            TestGroup::new("Panicky")
                .register("test", panics)
                .expect("register"),
        ];
        let summary = run(&groups, &Selection::default(), ExecutionModel::SingleThreaded);
        let failure = summary
            .groups()
            .first()
            .and_then(|group| group.cases().first())
            .and_then(CaseOutcome::failure)
            .cloned();
        assert_eq!(failure, Some(TestFailure::Panicked(String::from("exploded"))));
    }

    #[rstest]
    fn writes_result_lines(groups: Vec<TestGroup>) {
        let summary = run(&groups, &Selection::default(), ExecutionModel::SingleThreaded);
        let mut out = Vec::new();
        summary.write_results(&mut out).expect("write results");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(
            text,
            concat!(
                "LibTest::test - PASSED\n",
                "LibTest::broken - FAILED: boom\n",
                "LibIT::test - PASSED\n",
                "2 passed, 1 failed\n",
            )
        );
    }
}
