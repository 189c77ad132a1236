//! External command execution with deadlines and cancellation.

use super::process::{isolate, ChildGuard};
use crate::error::{PyccError, Result};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Shared flag that asks a running command to stop.
///
/// Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a command came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Process exited on its own with a status code.
    Exited(i32),
    /// Process was killed by a signal it did not get from us.
    Signaled(Option<i32>),
    /// Deadline elapsed and the process group was terminated.
    TimedOut,
    /// Cancel token fired and the process group was terminated.
    Cancelled,
}

impl Termination {
    fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::Exited(code),
            None => Self::Signaled(signal_of(&status)),
        }
    }
}

#[cfg(unix)]
fn signal_of(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// How the process ended.
    pub termination: Termination,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandResult {
    /// Exit code, if the process exited on its own.
    pub fn exit_code(&self) -> Option<i32> {
        match self.termination {
            Termination::Exited(code) => Some(code),
            _ => None,
        }
    }

    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code() == Some(0)
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Wall-clock limit (None = no limit).
    pub timeout: Option<Duration>,

    /// Token that terminates the command when cancelled.
    pub cancel: Option<CancelToken>,
}

/// Render a program and its arguments for messages and logs.
pub fn command_line<P, S>(program: P, args: &[S]) -> String
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let mut line = program.as_ref().to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

/// Execute a program directly (no shell), capturing stdout and stderr.
///
/// The child runs in its own process group. When the timeout elapses or the
/// cancel token fires, the whole group is terminated and the result carries
/// [`Termination::TimedOut`] or [`Termination::Cancelled`] along with whatever
/// output was produced so far.
///
/// # Errors
///
/// Returns `CommandFailed` if the program cannot be spawned or polled.
pub fn execute<P, S>(program: P, args: &[S], options: &CommandOptions) -> Result<CommandResult>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let start = Instant::now();
    let line = command_line(&program, args);

    let mut cmd = Command::new(program.as_ref());
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    isolate(&mut cmd);

    let child = cmd.spawn().map_err(|e| PyccError::CommandFailed {
        command: line.clone(),
        message: e.to_string(),
    })?;
    let mut guard = ChildGuard::new(child);
    tracing::debug!(pid = guard.id(), command = %line, "spawned");

    // Drain both pipes on their own threads so a chatty tool never blocks
    // on a full pipe while we poll for exit.
    let stdout_pump = guard.take_stdout().map(pump);
    let stderr_pump = guard.take_stderr().map(pump);

    // A deadline too far out to represent is no deadline.
    let deadline = options.timeout.and_then(|t| start.checked_add(t));
    let mut exited = None;

    // The run is over once the leader has exited and both pipes hit EOF.
    // Anything it left behind holding a pipe is still subject to the
    // deadline and the cancel token.
    let termination = loop {
        if exited.is_none() {
            let polled = guard.try_wait().map_err(|e| PyccError::CommandFailed {
                command: line.clone(),
                message: e.to_string(),
            })?;
            exited = polled.map(Termination::from_status);
        }
        if let Some(termination) = exited {
            if drained(&stdout_pump) && drained(&stderr_pump) {
                break termination;
            }
        }

        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            tracing::warn!(command = %line, "cancelled");
            guard.terminate();
            break Termination::Cancelled;
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            tracing::warn!(command = %line, "deadline elapsed");
            guard.terminate();
            break Termination::TimedOut;
        }

        thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout_pump.map(collect).unwrap_or_default();
    let stderr = stderr_pump.map(collect).unwrap_or_default();

    Ok(CommandResult {
        termination,
        stdout,
        stderr,
        duration: start.elapsed(),
    })
}

fn pump<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn drained(pump: &Option<JoinHandle<String>>) -> bool {
    pump.as_ref().map_or(true, JoinHandle::is_finished)
}

fn collect(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
