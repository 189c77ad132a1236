//! Child process ownership.
//!
//! [`ChildGuard`] owns a spawned child and guarantees it is terminated and
//! reaped on every exit path. On unix the child is started as the leader of
//! its own process group so that a terminate reaches every process the tool
//! forked, not only the direct child.

use std::io;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

/// How long a group gets between SIGTERM and SIGKILL.
const TERM_GRACE: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Configure a command so its child leads a fresh process group.
pub fn isolate(cmd: &mut Command) {
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }
    #[cfg(not(unix))]
    {
        let _ = cmd;
    }
}

/// A spawned child that is killed and reaped when dropped.
#[derive(Debug)]
pub struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    /// Take ownership of a freshly spawned child.
    pub fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// OS process id of the child (also its process group id on unix).
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Poll the child without blocking.
    pub fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        let status = self.child.try_wait()?;
        if status.is_some() {
            self.reaped = true;
        }
        Ok(status)
    }

    /// Whether the child has already been waited on.
    pub fn is_reaped(&self) -> bool {
        self.reaped
    }

    /// Terminate the whole process group and reap the child.
    ///
    /// Sends SIGTERM to the group, waits up to a short grace period, then
    /// sends SIGKILL. Once the leader has been reaped only its leftover
    /// group members are killed. Safe to call more than once.
    pub fn terminate(&mut self) {
        let pid = self.id();
        if self.reaped {
            signal_group(pid, Signal::Kill);
            return;
        }

        tracing::debug!(pid, "terminating process group");

        if signal_group(pid, Signal::Term) {
            let started = Instant::now();
            while started.elapsed() < TERM_GRACE {
                if matches!(self.try_wait(), Ok(Some(_))) {
                    // The leader is gone; make sure nothing it forked survives.
                    signal_group(pid, Signal::Kill);
                    return;
                }
                thread::sleep(POLL_INTERVAL);
            }
        }

        signal_group(pid, Signal::Kill);
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    Term,
    Kill,
}

/// Send a signal to a process group. Returns false if nothing was signalled.
#[cfg(unix)]
fn signal_group(pgid: u32, signal: Signal) -> bool {
    let sig = match signal {
        Signal::Term => libc::SIGTERM,
        Signal::Kill => libc::SIGKILL,
    };
    // SAFETY: killpg only sends a signal; an invalid group yields ESRCH.
    unsafe { libc::killpg(pgid as libc::pid_t, sig) == 0 }
}

#[cfg(not(unix))]
fn signal_group(_pgid: u32, _signal: Signal) -> bool {
    false
}
