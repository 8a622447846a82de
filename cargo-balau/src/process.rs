//! Launches the test application and forwards its output.
//!
//! Standard output and standard error are drained concurrently, each by its
//! own reader thread, and funnelled through a channel so the caller sees
//! lines in the order they were read. Lines keep their per-stream order.

use std::io::{BufRead, BufReader, Read};
use std::process::{ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;

use crate::error::RunnerError;
use crate::plan::RunPlan;

/// Stream a forwarded line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Child standard output.
    Stdout,
    /// Child standard error.
    Stderr,
}

/// One line of child output, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Originating stream.
    pub stream: Stream,
    /// Line text; invalid UTF-8 is replaced.
    pub text: String,
}

/// Runs `plan`, logging every output line at `info` level.
///
/// # Errors
///
/// See [`run_with`].
pub fn run(plan: &RunPlan) -> Result<(), RunnerError> {
    run_with(plan, |line| {
        tracing::info!(target: "cargo_balau::app", "{}", line.text);
    })
}

/// Runs `plan`, passing every output line to `on_line`.
///
/// # Errors
///
/// Returns [`RunnerError::Spawn`] when the program cannot start,
/// [`RunnerError::Output`] when reading its output fails,
/// [`RunnerError::ProcessFailed`] for a non-zero exit status, and
/// [`RunnerError::Terminated`] when it exits without a status code.
pub fn run_with<F>(plan: &RunPlan, mut on_line: F) -> Result<(), RunnerError>
where
    F: FnMut(OutputLine),
{
    let mut child = plan
        .command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            program: plan.program.clone(),
            source,
        })?;
    tracing::debug!(pid = child.id(), program = %plan.program, "started test application");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let forwarded = thread::scope(|scope| {
        let (sender, receiver) = mpsc::channel();
        let readers: Vec<_> = [
            stdout.map(|pipe| spawn_reader(scope, pipe, Stream::Stdout, sender.clone())),
            stderr.map(|pipe| spawn_reader(scope, pipe, Stream::Stderr, sender.clone())),
        ]
        .into_iter()
        .flatten()
        .collect();
        drop(sender);

        for line in receiver {
            on_line(line);
        }

        readers.into_iter().try_for_each(|reader| {
            reader
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("output reader panicked")))
        })
    });

    let status = child.wait().map_err(RunnerError::Output)?;
    forwarded.map_err(RunnerError::Output)?;
    check_status(status)
}

fn spawn_reader<'scope, R>(
    scope: &'scope thread::Scope<'scope, '_>,
    pipe: R,
    stream: Stream,
    sender: mpsc::Sender<OutputLine>,
) -> thread::ScopedJoinHandle<'scope, std::io::Result<()>>
where
    R: Read + Send + 'scope,
{
    scope.spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                return Ok(());
            }
            let text = String::from_utf8_lossy(&buffer)
                .trim_end_matches(['\n', '\r'])
                .to_owned();
            if sender.send(OutputLine { stream, text }).is_err() {
                return Ok(());
            }
        }
    })
}

fn check_status(status: ExitStatus) -> Result<(), RunnerError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(RunnerError::ProcessFailed(code)),
        None => Err(RunnerError::Terminated(status.to_string())),
    }
}
