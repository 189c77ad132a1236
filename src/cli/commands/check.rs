//! Check command implementation.
//!
//! Runs a selection of checkers and renders the report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;

use crate::engine::{Engine, RunProgress, Selection, DEFAULT_TIMEOUT};
use crate::error::Result;
use crate::report::{JsonFormatter, OutputFormat, ReportContext, ReportFormatter, TextFormatter};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Project};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    selection: Selection,
    timeout: Option<u64>,
    format: OutputFormat,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, selection: Selection) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            selection,
            timeout: None,
            format: OutputFormat::Text,
        }
    }

    /// Per-check timeout in seconds from the command line or environment.
    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        self
    }

    fn resolve_timeout(&self, project: &Project) -> Duration {
        self.timeout
            .map(Duration::from_secs)
            .or_else(|| project.config.timeout())
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::load(&self.project_root)?;
        project.apply_output_mode(ui);

        let timeout = self.resolve_timeout(&project);
        let engine = Engine::new(&project.registry).with_disabled(project.config.disabled.clone());
        let show_progress = self.format == OutputFormat::Text && ui.output_mode().shows_status();

        tracing::debug!(selection = ?self.selection, ?timeout, "running checks");
        let report = engine.run_with_progress(&self.selection, &project.root, timeout, |event| {
            if let RunProgress::CheckStarting { name, index, total } = event {
                if show_progress {
                    ui.message(&format!("[{}/{}] Running {}...", index + 1, total, name));
                }
            }
        })?;

        if show_progress && !report.results().is_empty() {
            ui.message("");
        }

        let ctx = ReportContext::new(&report, &project.root, Utc::now());
        let rendered = match self.format {
            OutputFormat::Json => JsonFormatter::new().render(&ctx),
            OutputFormat::Text => {
                TextFormatter::new(ui.theme().clone(), ui.output_mode()).render(&ctx)
            }
        };
        ui.emit(&rendered);

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::PyccError;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn project_with(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".pycc.yml"), config).unwrap();
        temp
    }

    const PLUGINS: &str = r#"
checkers:
  clean:
    command: "true"
    availability: path
  dirty:
    command: sh
    args: ["-c", "echo 'E501 line too long'; exit 1"]
    availability: path
  missing:
    command: pycc-missing-tool-xyz
"#;

    #[test]
    fn text_report_for_named_plugins() {
        let temp = project_with(PLUGINS);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(temp.path(), Selection::names(["clean", "dirty", "missing"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        let out = ui.emitted();
        assert!(out.contains("✓ clean passed"));
        assert!(out.contains("✗ dirty failed"));
        assert!(out.contains("    E501 line too long"));
        assert!(out.contains("○ missing skipped"));
        assert!(out.contains("1 check(s) failed"));
        assert!(ui.has_output("[1/3] Running clean..."));
    }

    #[test]
    fn json_report_has_no_progress_lines() {
        let temp = project_with(PLUGINS);
        let mut ui = MockUI::new();

        let result = CheckCommand::new(temp.path(), Selection::names(["clean", "missing"]))
            .with_json(true)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(ui.messages().is_empty());
        let json: serde_json::Value = serde_json::from_str(ui.emitted()).unwrap();
        assert_eq!(json["summary"]["passed"], 1);
        assert_eq!(json["summary"]["skipped"], 1);
        assert_eq!(json["results"][1]["duration"], 0.0);
    }

    #[test]
    fn config_timeout_applies() {
        let temp = project_with(
            "timeout: 1\ncheckers:\n  slow:\n    command: sleep\n    args: [\"30\"]\n    availability: path\n",
        );
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        let result = CheckCommand::new(temp.path(), Selection::names(["slow"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.emitted().contains("Check timed out after 1 seconds"));
    }

    #[test]
    fn cli_timeout_overrides_config() {
        let temp = project_with("timeout: 100\n");
        let project = Project::load(temp.path()).unwrap();
        let cmd = CheckCommand::new(temp.path(), Selection::All).with_timeout(Some(7));
        assert_eq!(cmd.resolve_timeout(&project), Duration::from_secs(7));

        let cmd = CheckCommand::new(temp.path(), Selection::All);
        assert_eq!(cmd.resolve_timeout(&project), Duration::from_secs(100));
    }

    #[test]
    fn unknown_checker_aborts() {
        let temp = project_with("");
        let mut ui = MockUI::new();

        let err = CheckCommand::new(temp.path(), Selection::names(["nonexistent"]))
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, PyccError::CheckerNotFound { .. }));
        assert!(ui.emitted().is_empty());
    }

    #[test]
    fn disabled_checkers_are_left_out_of_categories() {
        let temp = project_with(
            "disabled: [dirty]\ncheckers:\n  dirty:\n    command: \"false\"\n    category: lint\n    availability: path\n",
        );
        let project = Project::load(temp.path()).unwrap();
        let engine = Engine::new(&project.registry).with_disabled(project.config.disabled.clone());

        let resolved = engine
            .resolve(&Selection::Categories(vec![crate::checker::Category::Lint]))
            .unwrap();

        assert!(resolved.iter().all(|c| c.name() != "dirty"));
    }
}
