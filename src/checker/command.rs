//! Checker that runs an external command-line tool.

use super::probe::{self, Availability};
use super::{timeout_message, CheckContext, CheckResult, Checker, ConfigFile};
use crate::error::{PyccError, Result};
use crate::shell::{self, CommandOptions, CommandResult, Termination};
use std::path::Path;

/// How a tool's exit code maps onto a check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// 0 passes, anything else fails.
    #[default]
    Plain,
    /// 0 passes, the listed codes mean the tool itself broke, anything else fails.
    ErrorCodes(Vec<i32>),
    /// Pylint's bit-encoded status: bit 1 (fatal) or bit 32 (usage) is an
    /// error, any other non-zero value is a finding.
    PylintBitmask,
}

/// Classification of a tool's exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    Pass,
    Fail,
    Error,
}

impl ExitPolicy {
    pub fn classify(&self, code: i32) -> ExitClass {
        if code == 0 {
            return ExitClass::Pass;
        }
        match self {
            Self::Plain => ExitClass::Fail,
            Self::ErrorCodes(codes) if codes.contains(&code) => ExitClass::Error,
            Self::ErrorCodes(_) => ExitClass::Fail,
            Self::PylintBitmask if code & (1 | 32) != 0 => ExitClass::Error,
            Self::PylintBitmask => ExitClass::Fail,
        }
    }
}

/// Adapter for any tool driven by program + arguments.
///
/// The program is resolved against the project's virtualenv and then PATH,
/// run with the project as working directory, and its exit code classified
/// through an [`ExitPolicy`].
#[derive(Debug, Clone)]
pub struct CommandChecker {
    name: String,
    description: String,
    program: String,
    args: Vec<String>,
    availability: Availability,
    exit_policy: ExitPolicy,
    config_files: Vec<ConfigFile>,
}

impl CommandChecker {
    /// Create a checker that runs `program` with no arguments.
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            program: program.into(),
            args: Vec::new(),
            availability: Availability::default(),
            exit_policy: ExitPolicy::default(),
            config_files: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    pub fn with_config_file(mut self, file: ConfigFile) -> Self {
        self.config_files.push(file);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn exit_policy(&self) -> &ExitPolicy {
        &self.exit_policy
    }

    /// Turn a finished command into a check result.
    pub fn interpret(&self, result: CommandResult, ctx: &CheckContext) -> CheckResult {
        let CommandResult {
            termination,
            stdout,
            stderr,
            ..
        } = result;

        match termination {
            Termination::Exited(code) => match self.exit_policy.classify(code) {
                ExitClass::Pass => CheckResult::passed(&self.name, stdout),
                ExitClass::Fail => {
                    let error = diagnostic_text(&stderr, &stdout);
                    CheckResult::failed(&self.name, stdout, error)
                }
                ExitClass::Error => {
                    let mut error = format!("{} exited with error code {}", self.program, code);
                    let detail = diagnostic_text(&stderr, &stdout);
                    if !detail.is_empty() {
                        error.push('\n');
                        error.push_str(&detail);
                    }
                    CheckResult::error(&self.name, error).with_output(stdout)
                }
            },
            Termination::Signaled(signal) => {
                let error = match signal {
                    Some(sig) => format!("{} was terminated by signal {}", self.program, sig),
                    None => format!("{} was terminated by a signal", self.program),
                };
                CheckResult::error(&self.name, error).with_output(stdout)
            }
            Termination::TimedOut => {
                CheckResult::error(&self.name, timeout_message(ctx.timeout())).with_output(stdout)
            }
            Termination::Cancelled => {
                CheckResult::error(&self.name, "Check was cancelled").with_output(stdout)
            }
        }
    }
}

/// Findings text: stderr when the tool wrote any, otherwise stdout.
fn diagnostic_text(stderr: &str, stdout: &str) -> String {
    let stderr = stderr.trim_end();
    if stderr.is_empty() {
        stdout.trim_end().to_string()
    } else {
        stderr.to_string()
    }
}

impl Checker for CommandChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_available(&self, project_path: &Path) -> bool {
        self.availability.probe(&self.program, project_path)
    }

    fn check(&self, ctx: &CheckContext) -> Result<CheckResult> {
        let entries = shell::search_path(ctx.project_path());
        let program = shell::resolve_tool_path(&self.program, &entries).ok_or_else(|| {
            PyccError::CommandFailed {
                command: shell::command_line(&self.program, &self.args),
                message: "executable not found".to_string(),
            }
        })?;

        let options = CommandOptions {
            cwd: Some(ctx.project_path().to_path_buf()),
            timeout: Some(ctx.timeout()),
            cancel: Some(ctx.cancel_token().clone()),
            ..Default::default()
        };

        tracing::debug!(checker = %self.name, program = %program.display(), "running");
        let result = shell::execute(&program, &self.args, &options)?;
        Ok(self.interpret(result, ctx))
    }

    fn config_files(&self) -> Vec<ConfigFile> {
        self.config_files.clone()
    }

    fn version(&self, project_path: &Path) -> Option<String> {
        probe::detect_version(&self.program, project_path)
    }
}
