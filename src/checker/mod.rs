//! Checker abstraction.
//!
//! A [`Checker`] wraps one external code-quality tool. It knows its own
//! name, whether the tool can be run in a given project, how to run it and
//! interpret the outcome, and which configuration files it would like to
//! see in the project.

pub mod builtin;
pub mod category;
pub mod command;
pub mod probe;
pub mod result;

pub use builtin::{register_builtins, BUILTIN_DEFS};
pub use category::Category;
pub use command::{CommandChecker, ExitClass, ExitPolicy};
pub use probe::Availability;
pub use result::{CheckResult, CheckStatus};

use crate::error::Result;
use crate::shell::CancelToken;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A configuration file a checker would like written into the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFile {
    pub filename: String,
    pub content: String,
    pub description: String,
}

impl ConfigFile {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            description: description.into(),
        }
    }
}

/// Everything a checker needs for one invocation.
#[derive(Debug, Clone)]
pub struct CheckContext {
    project_path: PathBuf,
    timeout: Duration,
    cancel: CancelToken,
}

impl CheckContext {
    pub fn new(project_path: &Path, timeout: Duration) -> Self {
        Self::with_cancel(project_path, timeout, CancelToken::new())
    }

    pub fn with_cancel(project_path: &Path, timeout: Duration, cancel: CancelToken) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            timeout,
            cancel,
        }
    }

    /// Directory the tool is run against.
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Wall-clock limit for the invocation.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Token the engine fires when the invocation must stop.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

/// One code-quality tool.
///
/// Implementations are shared across threads by the engine, so they must
/// be `Send + Sync`. `check` is only called after `is_available` returned
/// `true` for the same project.
pub trait Checker: Send + Sync {
    /// Unique registry key.
    fn name(&self) -> &str;

    /// One-line human description.
    fn description(&self) -> &str;

    /// Whether the tool can be run against `project_path`. Never fails.
    fn is_available(&self, project_path: &Path) -> bool;

    /// Run the tool.
    ///
    /// Findings are reported through the returned [`CheckResult`]; an `Err`
    /// means the adapter itself could not do its job and is recorded by the
    /// engine as an error result.
    fn check(&self, ctx: &CheckContext) -> Result<CheckResult>;

    /// Configuration files this tool reads, for `--generate-config`.
    fn config_files(&self) -> Vec<ConfigFile> {
        Vec::new()
    }

    /// Installed tool version, when it can be determined.
    fn version(&self, _project_path: &Path) -> Option<String> {
        None
    }
}

/// Error text recorded when a check exceeds its time limit.
pub fn timeout_message(timeout: Duration) -> String {
    format!("Check timed out after {} seconds", timeout.as_secs())
}
