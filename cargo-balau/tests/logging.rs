//! Verbosity handling for the log filter.

use cargo_balau::logging::filter_for;
use rstest::rstest;
use test_helpers::env;

#[rstest]
fn quiet_run_honours_rust_log() {
    let _lock = env::lock();
    let _guard = env::set_var("RUST_LOG", "warn");
    assert_eq!(filter_for(0).to_string(), "warn");
}

#[rstest]
fn quiet_run_defaults_to_info() {
    let _lock = env::lock();
    let _guard = env::remove_var("RUST_LOG");
    assert_eq!(filter_for(0).to_string(), "info");
}

#[rstest]
#[case(1, "debug")]
#[case(2, "trace")]
#[case(5, "trace")]
fn verbose_flags_override_rust_log(#[case] verbosity: u8, #[case] expected: &str) {
    let _lock = env::lock();
    let _guard = env::set_var("RUST_LOG", "error");
    assert_eq!(filter_for(verbosity).to_string(), expected);
}
