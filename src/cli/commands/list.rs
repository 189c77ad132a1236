//! List command implementation.
//!
//! The `pycc --list` command shows every registered checker grouped by
//! category, with its availability and detected version.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::checker::Category;
use crate::error::Result;
use crate::registry::CheckerInfo;
use crate::ui::{PyccTheme, UserInterface};

use super::dispatcher::{Command, CommandResult, Project};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    json: bool,
}

/// A listed checker plus the version its tool reported.
struct Listed {
    info: CheckerInfo,
    version: Option<String>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, json: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            json,
        }
    }

    fn render_text(&self, theme: &PyccTheme, listed: &[Listed]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", theme.format_header("Available Checkers"));

        let mut sections: Vec<(String, Vec<&Listed>)> = Category::ALL
            .into_iter()
            .map(|c| {
                let members = listed
                    .iter()
                    .filter(|l| l.info.category == Some(c))
                    .collect();
                (c.heading(), members)
            })
            .collect();
        sections.push((
            "CUSTOM CHECKS".to_string(),
            listed.iter().filter(|l| l.info.category.is_none()).collect(),
        ));

        for (heading, members) in sections.iter().filter(|(_, m)| !m.is_empty()) {
            let _ = writeln!(out, "\n{}", theme.category.apply_to(format!("{}:", heading)));
            for entry in members {
                let _ = writeln!(out, "  {}", format_entry(theme, entry));
            }
        }

        let available = listed.iter().filter(|l| l.info.available).count();
        let _ = writeln!(
            out,
            "\nTotal: {}/{} checkers available",
            available,
            listed.len()
        );
        out
    }
}

fn format_entry(theme: &PyccTheme, entry: &Listed) -> String {
    let mut line = format!("{}: {}", entry.info.name, entry.info.description);
    if let Some(version) = &entry.version {
        line.push_str(&format!(" ({})", version));
    }
    if entry.info.available {
        theme.format_success(&line)
    } else {
        theme.format_error(&line)
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root)?;

        if self.json {
            let infos = project.registry.list_checkers(&project.root);
            let json = serde_json::to_string_pretty(&infos).map_err(anyhow::Error::from)?;
            ui.emit(&format!("{}\n", json));
            return Ok(CommandResult::success());
        }

        let listed: Vec<Listed> = project
            .registry
            .list_checkers(&project.root)
            .into_iter()
            .map(|info| {
                let version = if info.available {
                    project
                        .registry
                        .get(&info.name)
                        .ok()
                        .and_then(|c| c.version(&project.root))
                } else {
                    None
                };
                Listed { info, version }
            })
            .collect();

        let text = self.render_text(ui.theme(), &listed);
        ui.emit(&text);
        Ok(CommandResult::success())
    }
}
