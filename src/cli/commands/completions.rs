//! Shell completions generation.

use crate::cli::args::Cli;
use crate::ui::UserInterface;
use clap::CommandFactory;
use clap_complete::Shell;

use super::dispatcher::{Command, CommandResult};

/// Prints a completion script for `pycc --completions <shell>`.
pub struct CompletionsCommand {
    shell: Shell,
}

impl CompletionsCommand {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let mut buf = Vec::new();
        clap_complete::generate(self.shell, &mut Cli::command(), "pycc", &mut buf);
        ui.emit(&String::from_utf8_lossy(&buf));
        Ok(CommandResult::success())
    }
}
