//! Test groups registered by the `hello-tests` application.
//!
//! `LibTest` holds unit tests and `LibIT` integration tests; the launcher's
//! default `*Test::*` pattern therefore runs only the former.

use balau_testing::assert::{assert_that, is};
use balau_testing::{HarnessError, TestFailure, TestGroup, TestResult};

use crate::{hello_it, hello_test};

/// Unit test group checking the `Test` greeting.
///
/// # Errors
///
/// Returns [`HarnessError::DuplicateTest`] if registration is inconsistent.
pub fn lib_test() -> Result<TestGroup, HarnessError> {
    TestGroup::new("LibTest").register("test", lib_test_test)
}

/// Integration test group checking the `IT` greeting.
///
/// # Errors
///
/// Returns [`HarnessError::DuplicateTest`] if registration is inconsistent.
pub fn lib_it() -> Result<TestGroup, HarnessError> {
    TestGroup::new("LibIT").register("test", lib_it_test)
}

/// Every group, in the order the application runs them.
///
/// # Errors
///
/// Propagates registration failures from the individual groups.
pub fn all() -> Result<Vec<TestGroup>, HarnessError> {
    Ok(vec![lib_test()?, lib_it()?])
}

fn lib_test_test() -> TestResult {
    let mut stream = Vec::new();
    hello_test(&mut stream)?;
    assert_that(captured(stream)?, is("Hello, Test world.\n"))
}

fn lib_it_test() -> TestResult {
    let mut stream = Vec::new();
    hello_it(&mut stream)?;
    assert_that(captured(stream)?, is("Hello, IT world.\n"))
}

/// Decodes captured output without replacing invalid bytes.
fn captured(stream: Vec<u8>) -> Result<String, TestFailure> {
    String::from_utf8(stream)
        .map_err(|err| TestFailure::Message(format!("output is not valid UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use balau_testing::ExecutionModel;
    use balau_testing::pattern::Selection;
    use balau_testing::runner::run;
    use rstest::rstest;

    #[rstest]
    #[case(&["*Test::*"], &["LibTest"])]
    #[case(&["*IT::*"], &["LibIT"])]
    #[case(&[], &["LibTest", "LibIT"])]
    fn groups_pass_under_selection(#[case] patterns: &[&str], #[case] expected: &[&str]) {
        let groups = all().expect("register groups");
        let selection = Selection::new(patterns).expect("compile patterns");
        let summary = run(&groups, &selection, ExecutionModel::SingleThreaded);
        let names: Vec<&str> = summary.groups().iter().map(|group| group.name()).collect();
        assert_eq!(names, expected);
        assert!(summary.all_passed());
    }

    #[rstest]
    fn captured_output_is_decoded_verbatim() {
        assert_eq!(
            captured(b"Hello, IT world.\n".to_vec()),
            Ok(String::from("Hello, IT world.\n"))
        );
    }

    #[rstest]
    #[case(b"Hello, IT world.\xff\n".to_vec())]
    #[case(b"Hello, Test world.\xc3\n".to_vec())]
    fn invalid_utf8_output_fails_instead_of_being_replaced(#[case] stream: Vec<u8>) {
        let outcome = captured(stream);
        assert!(
            matches!(outcome, Err(TestFailure::Message(ref msg)) if msg.starts_with("output is not valid UTF-8")),
            "unexpected {outcome:?}"
        );
    }
}
