//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgGroup, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::checker::Category;
use crate::engine::Selection;
use crate::error::{PyccError, Result};
use crate::ui::OutputMode;

/// Python Code Checker - run Python code-quality tools and summarize the results.
#[derive(Debug, Parser)]
#[command(name = "pycc")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .args(["all", "check", "list", "generate_config", "completions"])
        .multiple(false)
))]
#[command(after_help = "Examples:
  pycc --all                    # Run all checks
  pycc --format --lint          # Run formatting and linting checks
  pycc --generate-config        # Generate configuration files
  pycc --list                   # List all checkers
  pycc --check black flake8     # Run specific checkers")]
pub struct Cli {
    /// Run all checks
    #[arg(short, long)]
    pub all: bool,

    /// Run specific checkers
    #[arg(short, long, value_name = "CHECKER", num_args = 1.., value_delimiter = ',')]
    pub check: Option<Vec<String>>,

    /// List all checkers and whether they are installed
    #[arg(short, long)]
    pub list: bool,

    /// Generate configuration files for all checkers
    #[arg(short, long)]
    pub generate_config: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Run formatting checks (black, isort)
    #[arg(short, long, help_heading = "Check Categories", conflicts_with = "action")]
    pub format: bool,

    /// Run linting checks (flake8, pylint)
    #[arg(long, help_heading = "Check Categories", conflicts_with = "action")]
    pub lint: bool,

    /// Run type checking (mypy)
    #[arg(short = 't', long = "type", help_heading = "Check Categories", conflicts_with = "action")]
    pub type_check: bool,

    /// Run security checks (bandit, safety)
    #[arg(short, long, help_heading = "Check Categories", conflicts_with = "action")]
    pub security: bool,

    /// Run documentation checks (pydocstyle)
    #[arg(short, long, help_heading = "Check Categories", conflicts_with = "action")]
    pub docs: bool,

    /// Run complexity checks (vulture, radon)
    #[arg(short = 'x', long, help_heading = "Check Categories", conflicts_with = "action")]
    pub complexity: bool,

    /// Project path to check (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    pub project_path: Option<PathBuf>,

    /// Timeout for each check in seconds (default: 300)
    #[arg(long, value_name = "SECS", env = "PYCC_TIMEOUT",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Show captured tool output for every check
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress output except for failures and the verdict
    #[arg(short, long)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Overwrite existing files when generating configuration
    #[arg(long, requires = "generate_config")]
    pub force: bool,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Selection),
    List,
    GenerateConfig,
    Completions(Shell),
}

impl Cli {
    /// Category flags that were set, in fixed order.
    pub fn categories(&self) -> Vec<Category> {
        let flags = [
            (self.format, Category::Format),
            (self.lint, Category::Lint),
            (self.type_check, Category::Type),
            (self.security, Category::Security),
            (self.docs, Category::Docs),
            (self.complexity, Category::Complexity),
        ];
        flags
            .into_iter()
            .filter_map(|(set, category)| set.then_some(category))
            .collect()
    }

    /// Work out what to do from the flags.
    ///
    /// # Errors
    ///
    /// `NoSelection` when neither an action nor a category was given.
    pub fn action(&self) -> Result<Action> {
        if let Some(shell) = self.completions {
            return Ok(Action::Completions(shell));
        }
        if self.list {
            return Ok(Action::List);
        }
        if self.generate_config {
            return Ok(Action::GenerateConfig);
        }
        if self.all {
            return Ok(Action::Run(Selection::All));
        }
        if let Some(names) = &self.check {
            return Ok(Action::Run(Selection::Names(names.clone())));
        }

        let categories = self.categories();
        if categories.is_empty() {
            return Err(PyccError::NoSelection);
        }
        Ok(Action::Run(Selection::Categories(categories)))
    }

    /// Output mode requested on the command line.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}
