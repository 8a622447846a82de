//! Test groups and their registered cases.

use crate::error::{HarnessError, TestResult};

/// Signature of a registered test method.
pub type TestFn = fn() -> TestResult;

/// A single registered test method.
#[derive(Debug, Clone)]
pub struct TestCase {
    group: String,
    name: String,
    body: TestFn,
}

impl TestCase {
    /// Name of the owning group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Name the case was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `Group::case`, the name patterns are matched against.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.group, self.name)
    }

    pub(crate) fn run(&self) -> TestResult {
        (self.body)()
    }
}

/// Named collection of test cases, kept in registration order.
///
/// # Examples
///
/// ```
/// use balau_testing::group::TestGroup;
///
/// fn passes() -> balau_testing::TestResult {
///     Ok(())
/// }
///
/// let group = TestGroup::new("LibTest").register("test", passes)?;
/// assert_eq!(group.cases().len(), 1);
/// # Ok::<(), balau_testing::HarnessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TestGroup {
    name: String,
    cases: Vec<TestCase>,
}

impl TestGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Registers `body` under `case`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateTest`] when `case` is already
    /// registered in this group.
    pub fn register(mut self, case: impl Into<String>, body: TestFn) -> Result<Self, HarnessError> {
        let case_name = case.into();
        if self.cases.iter().any(|existing| existing.name == case_name) {
            return Err(HarnessError::DuplicateTest {
                group: self.name,
                case: case_name,
            });
        }
        self.cases.push(TestCase {
            group: self.name.clone(),
            name: case_name,
            body,
        });
        Ok(self)
    }

    /// Group name, also used as the report file stem.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered cases in registration order.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }
}
