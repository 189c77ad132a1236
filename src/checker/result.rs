//! Check outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Terminal outcome of one checker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The tool ran and reported no findings.
    Passed,
    /// The tool ran and reported findings.
    Failed,
    /// The tool could not be run or did not run to completion.
    Error,
    /// The tool is not available in this environment.
    Skipped,
}

impl CheckStatus {
    /// All statuses in reporting order.
    pub const ALL: [CheckStatus; 4] = [Self::Passed, Self::Failed, Self::Error, Self::Skipped];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Skipped => "skipped",
        }
    }

    /// Failed and Error count against the run; Passed and Skipped do not.
    pub fn is_problem(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one checker invocation.
///
/// Built once through the constructors below and read through accessors.
/// `error` is empty unless the status is [`CheckStatus::Failed`] or
/// [`CheckStatus::Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    name: String,
    status: CheckStatus,
    duration: Duration,
    output: String,
    error: String,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, output: String, error: String) -> Self {
        Self {
            name: name.to_string(),
            status,
            duration: Duration::ZERO,
            output,
            error,
        }
    }

    /// The tool ran cleanly.
    pub fn passed(name: &str, output: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Passed, output.into(), String::new())
    }

    /// The tool ran and reported findings.
    pub fn failed(name: &str, output: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Failed, output.into(), error.into())
    }

    /// The tool could not be run to completion.
    pub fn error(name: &str, error: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Error, String::new(), error.into())
    }

    /// The tool is not available; never ran.
    pub fn skipped(name: &str) -> Self {
        Self::new(name, CheckStatus::Skipped, String::new(), String::new())
    }

    /// Attach captured output (e.g. partial output of a timed-out tool).
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub(crate) fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub(crate) fn with_name(mut self, name: &str) -> Self {
        if self.name != name {
            self.name = name.to_string();
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    /// Wall-clock time of the invocation.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Captured standard output.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Captured diagnostic text.
    pub fn error_text(&self) -> &str {
        &self.error
    }
}
