//! End-to-end runs of the `cargo-balau` binary against fake test
//! applications.
#![cfg(unix)]

use anyhow::{Result, ensure};
use assert_cmd::Command;
use rstest::{fixture, rstest};
use test_helpers::app::BuildTree;

const ECHO_ARGS: &str = "echo \"args: $*\"";

/// Exit outcome and combined log output of one launcher run.
struct Run {
    success: bool,
    stderr: String,
}

fn cargo_balau(tree: &BuildTree, args: &[&str], env: &[(&str, &str)]) -> Result<Run> {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API"
    )]
    let mut cmd = Command::cargo_bin("cargo-balau")?;
    cmd.current_dir(tree.build_dir())
        .env_remove("RUST_LOG")
        .env_remove("BALAU_PATTERNS")
        .env_remove("BALAU_EXECUTION_MODEL")
        .env_remove("BALAU_APP_PATH")
        .env("RUST_BACKTRACE", "0")
        .args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output()?;
    Ok(Run {
        success: output.status.success(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[fixture]
fn tree() -> BuildTree {
    BuildTree::new().expect("create build tree")
}

#[rstest]
fn runs_default_app_with_default_arguments(tree: BuildTree) -> Result<()> {
    tree.install_script("bin/Tests", ECHO_ARGS)?;
    let cmake = tree.cmake_dir();
    let expected = format!("args: -e SingleThreaded -r {cmake}/unitTestReports *Test::*");

    let run = cargo_balau(&tree, &["--build-dir", tree.build_dir().as_str()], &[])?;

    ensure!(run.success, "launcher failed: {}", run.stderr);
    ensure!(run.stderr.contains(&expected), "missing {expected:?} in {}", run.stderr);
    Ok(())
}

#[rstest]
fn accepts_cargo_subcommand_invocation(tree: BuildTree) -> Result<()> {
    tree.install_script("Tests", ECHO_ARGS)?;
    let cmake = tree.cmake_dir();
    let expected = format!("args: -e WorkerThreads -r {cmake}/unitTestReports *IT::*");

    let run = cargo_balau(
        &tree,
        &["balau", "--cmake-dir", cmake.as_str(), "-e", "WorkerThreads", "*IT::*"],
        &[],
    )?;

    ensure!(run.success, "launcher failed: {}", run.stderr);
    ensure!(run.stderr.contains(&expected), "missing {expected:?} in {}", run.stderr);
    Ok(())
}

#[rstest]
fn environment_supplies_patterns(tree: BuildTree) -> Result<()> {
    tree.install_script("bin/Tests", ECHO_ARGS)?;
    let cmake = tree.cmake_dir();

    let run = cargo_balau(
        &tree,
        &["--cmake-dir", cmake.as_str(), "--report-dir", "/tmp/reports"],
        &[("BALAU_PATTERNS", "A::*,B::*")],
    )?;

    ensure!(run.success, "launcher failed: {}", run.stderr);
    ensure!(
        run.stderr.contains("args: -e SingleThreaded -r /tmp/reports A::* B::*"),
        "unexpected output: {}",
        run.stderr
    );
    Ok(())
}

#[rstest]
fn config_file_in_working_directory_is_used(tree: BuildTree) -> Result<()> {
    tree.install_script("custom/Runner", ECHO_ARGS)?;
    std::fs::write(
        tree.build_dir().join("balau.toml"),
        "app_path = \"custom/Runner\"\nexecution_model = \"WorkerThreads\"\n",
    )?;

    let run = cargo_balau(&tree, &["--build-dir", tree.build_dir().as_str()], &[])?;

    ensure!(run.success, "launcher failed: {}", run.stderr);
    ensure!(run.stderr.contains("args: -e WorkerThreads"), "unexpected output: {}", run.stderr);
    Ok(())
}

#[rstest]
fn failing_app_fails_the_run(tree: BuildTree) -> Result<()> {
    tree.install_script("bin/Tests", "echo \"LibTest::test - FAILED\"\nexit 3")?;

    let run = cargo_balau(&tree, &["--build-dir", tree.build_dir().as_str()], &[])?;

    ensure!(!run.success, "launcher should fail");
    ensure!(run.stderr.contains("LibTest::test - FAILED"), "output not forwarded: {}", run.stderr);
    ensure!(run.stderr.contains("exit status 3"), "status not reported: {}", run.stderr);
    Ok(())
}

#[rstest]
fn missing_app_is_reported(tree: BuildTree) -> Result<()> {
    let run = cargo_balau(&tree, &["--build-dir", tree.build_dir().as_str()], &[])?;

    ensure!(!run.success, "launcher should fail");
    ensure!(
        run.stderr.contains("No Tests executable found in either"),
        "unexpected output: {}",
        run.stderr
    );
    Ok(())
}

#[rstest]
fn verbose_run_logs_resolved_application(tree: BuildTree) -> Result<()> {
    tree.install_script("bin/Tests", ECHO_ARGS)?;
    let cmake = tree.cmake_dir();

    let run = cargo_balau(
        &tree,
        &["-v", "--cmake-dir", cmake.as_str(), "-e", "WorkerThreads"],
        &[],
    )?;

    ensure!(run.success, "launcher failed: {}", run.stderr);
    let event = run
        .stderr
        .lines()
        .find(|line| line.contains("resolved test application"))
        .ok_or_else(|| anyhow::anyhow!("no resolution event in {}", run.stderr))?;
    for field in [
        format!("cmake_dir={cmake}"),
        format!("app_dir={cmake}/bin"),
        String::from("app_name=Tests"),
        String::from("execution_model=WorkerThreads"),
    ] {
        ensure!(event.contains(&field), "missing {field:?} in {event:?}");
    }
    ensure!(event.contains("DEBUG"), "expected a debug event: {event:?}");
    Ok(())
}

#[rstest]
fn default_verbosity_hides_resolution_event(tree: BuildTree) -> Result<()> {
    tree.install_script("bin/Tests", ECHO_ARGS)?;

    let run = cargo_balau(&tree, &["--build-dir", tree.build_dir().as_str()], &[])?;

    ensure!(run.success, "launcher failed: {}", run.stderr);
    ensure!(
        !run.stderr.contains("resolved test application"),
        "debug event shown without -v: {}",
        run.stderr
    );
    Ok(())
}
