//! Configuration schema for `.pycc.yml`.

use crate::checker::{Availability, Category, CommandChecker, ExitPolicy};
use crate::ui::OutputMode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Root of a project configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PyccConfig {
    /// Per-check timeout in seconds.
    pub timeout: Option<u64>,

    /// Default output mode: verbose, normal, quiet.
    pub output: Option<OutputMode>,

    /// Checkers left out of `--all` and category runs.
    pub disabled: Vec<String>,

    /// Extra command-line checkers, keyed by name.
    pub checkers: BTreeMap<String, PluginConfig>,
}

impl PyccConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// A checker declared in the project config.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    #[serde(default)]
    pub description: String,

    /// Program to run, looked up like the built-in tools.
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Category the checker joins, if any.
    #[serde(default)]
    pub category: Option<Category>,

    /// How to decide whether the tool is installed.
    #[serde(default)]
    pub availability: Availability,

    /// Exit codes that mean the tool itself broke.
    #[serde(default)]
    pub error_exit_codes: Vec<i32>,
}

impl PluginConfig {
    /// Build the checker this entry describes.
    pub fn to_checker(&self, name: &str) -> CommandChecker {
        let policy = if self.error_exit_codes.is_empty() {
            ExitPolicy::Plain
        } else {
            ExitPolicy::ErrorCodes(self.error_exit_codes.clone())
        };

        CommandChecker::new(name, &self.command)
            .with_description(&self.description)
            .with_args(self.args.iter().cloned())
            .with_availability(self.availability.clone())
            .with_exit_policy(policy)
    }
}
