//! Generate-config command implementation.
//!
//! The `pycc --generate-config` command writes the default configuration
//! files of every registered checker into the project.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::generate::{plan_config_files, write_config_files};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Project};

/// The generate-config command implementation.
pub struct GenerateCommand {
    project_root: PathBuf,
    force: bool,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(project_root: &Path, force: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            force,
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root)?;
        let planned = plan_config_files(&project.registry);
        let outcome = write_config_files(&planned, &project.root, self.force)?;

        for path in &outcome.written {
            ui.success(&format!("Generated {}", path.display()));
        }
        for path in &outcome.skipped {
            ui.warning(&format!(
                "{} already exists, skipping (use --force to overwrite)",
                path.display()
            ));
        }

        Ok(CommandResult::success())
    }
}
