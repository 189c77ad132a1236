//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`Project`] for the setup every project-scoped command shares
//! - [`CommandDispatcher`] for routing actions

use std::path::{Path, PathBuf};

use crate::cli::args::{Action, Cli};
use crate::config::{self, PyccConfig};
use crate::error::{PyccError, Result};
use crate::registry::CheckerRegistry;
use crate::ui::{OutputMode, UserInterface};

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::generate::GenerateCommand;
use super::list::ListCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// A validated project directory with its config and checker registry.
pub struct Project {
    pub root: PathBuf,
    pub config: PyccConfig,
    pub registry: CheckerRegistry,
}

impl Project {
    /// Validate `root`, load its config and build the registry
    /// (built-ins first, then config plugins).
    pub fn load(root: &Path) -> Result<Self> {
        validate_project_path(root)?;
        let config = config::load_project_config(root)?;
        let mut registry = CheckerRegistry::with_builtins()?;
        config::register_plugins(&config, &mut registry)?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
            registry,
        })
    }

    /// Apply the config's output mode when no CLI flag chose one.
    pub fn apply_output_mode(&self, ui: &mut dyn UserInterface) {
        if ui.output_mode() == OutputMode::Normal {
            if let Some(mode) = self.config.output {
                ui.set_output_mode(mode);
            }
        }
    }
}

/// Check that the project path exists and is a directory.
pub fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PyccError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(PyccError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "is not a directory".to_string(),
        });
    }
    Ok(())
}

/// Dispatches CLI actions to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute the action selected by `cli`.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match cli.action()? {
            Action::Run(selection) => {
                let cmd = CheckCommand::new(&self.project_root, selection)
                    .with_timeout(cli.timeout)
                    .with_json(cli.json);
                cmd.execute(ui)
            }
            Action::List => ListCommand::new(&self.project_root, cli.json).execute(ui),
            Action::GenerateConfig => {
                GenerateCommand::new(&self.project_root, cli.force).execute(ui)
            }
            Action::Completions(shell) => CompletionsCommand::new(shell).execute(ui),
        }
    }
}
