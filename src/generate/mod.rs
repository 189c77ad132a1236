//! Config-file generation.
//!
//! Collects the [`ConfigFile`](crate::checker::ConfigFile) manifests of every
//! registered checker and writes them into the project. Several tools keep
//! their settings in `pyproject.toml`, so fragments aimed at the same file
//! are merged in registration order.

use crate::error::Result;
use crate::registry::CheckerRegistry;
use std::fs;
use std::path::{Path, PathBuf};

/// One file to be written, merged from every checker that contributes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub filename: String,
    pub content: String,
    /// Descriptions of the merged fragments.
    pub descriptions: Vec<String>,
}

/// What [`write_config_files`] did.
#[derive(Debug, Default)]
pub struct GenerateOutcome {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Merge every checker's config fragments by filename.
///
/// Files appear in the order their first fragment was registered. Identical
/// fragments are only included once.
pub fn plan_config_files(registry: &CheckerRegistry) -> Vec<PlannedFile> {
    let mut planned: Vec<PlannedFile> = Vec::new();

    for checker in registry.iter() {
        for file in checker.config_files() {
            let fragment = file.content.trim_end();
            let index = match planned.iter().position(|p| p.filename == file.filename) {
                Some(i) => i,
                None => {
                    planned.push(PlannedFile {
                        filename: file.filename.clone(),
                        content: String::new(),
                        descriptions: Vec::new(),
                    });
                    planned.len() - 1
                }
            };
            let entry = &mut planned[index];

            if entry.content.contains(fragment) {
                continue;
            }
            if !entry.content.is_empty() {
                entry.content.push('\n');
            }
            entry.content.push_str(fragment);
            entry.content.push('\n');
            entry.descriptions.push(file.description);
        }
    }

    planned
}

/// Write the planned files into `project_path`.
///
/// Existing files are skipped unless `force` is set.
pub fn write_config_files(
    planned: &[PlannedFile],
    project_path: &Path,
    force: bool,
) -> Result<GenerateOutcome> {
    let mut outcome = GenerateOutcome::default();

    for file in planned {
        let path = project_path.join(&file.filename);
        if path.exists() && !force {
            tracing::debug!(path = %path.display(), "config file exists, skipping");
            outcome.skipped.push(path);
            continue;
        }

        fs::write(&path, &file.content)?;
        tracing::debug!(path = %path.display(), "wrote config file");
        outcome.written.push(path);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CheckContext, CheckResult, Checker, ConfigFile};
    use tempfile::TempDir;

    struct Fragments {
        name: &'static str,
        files: Vec<ConfigFile>,
    }

    impl Checker for Fragments {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            ""
        }
        fn is_available(&self, _project_path: &Path) -> bool {
            true
        }
        fn check(&self, _ctx: &CheckContext) -> Result<CheckResult> {
            Ok(CheckResult::passed(self.name, ""))
        }
        fn config_files(&self) -> Vec<ConfigFile> {
            self.files.clone()
        }
    }

    #[test]
    fn builtins_produce_three_files() {
        let registry = CheckerRegistry::with_builtins().unwrap();
        let planned = plan_config_files(&registry);

        let names: Vec<_> = planned.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, ["pyproject.toml", ".flake8", ".bandit"]);
    }

    #[test]
    fn pyproject_merges_every_tool_section() {
        let registry = CheckerRegistry::with_builtins().unwrap();
        let planned = plan_config_files(&registry);
        let pyproject = &planned[0];

        for section in [
            "[tool.black]",
            "[tool.isort]",
            "[tool.pylint.messages_control]",
            "[tool.mypy]",
            "[tool.pydocstyle]",
        ] {
            assert!(pyproject.content.contains(section), "missing {section}");
        }
        assert_eq!(pyproject.descriptions.len(), 5);
        assert!(pyproject.content.find("[tool.black]") < pyproject.content.find("[tool.mypy]"));
    }

    #[test]
    fn identical_fragments_are_deduplicated() {
        let mut registry = CheckerRegistry::new();
        let shared = ConfigFile::new("setup.cfg", "[tool]\nx = 1\n", "shared");
        for name in ["a", "b"] {
            registry
                .register(Box::new(Fragments {
                    name,
                    files: vec![shared.clone()],
                }))
                .unwrap();
        }

        let planned = plan_config_files(&registry);

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].content, "[tool]\nx = 1\n");
    }

    #[test]
    fn writes_files_and_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".flake8"), "keep me").unwrap();
        let registry = CheckerRegistry::with_builtins().unwrap();
        let planned = plan_config_files(&registry);

        let outcome = write_config_files(&planned, temp.path(), false).unwrap();

        assert_eq!(outcome.written.len(), 2);
        assert_eq!(outcome.skipped, [temp.path().join(".flake8")]);
        assert_eq!(
            fs::read_to_string(temp.path().join(".flake8")).unwrap(),
            "keep me"
        );
        assert!(fs::read_to_string(temp.path().join(".bandit"))
            .unwrap()
            .contains("exclude_dirs"));
    }

    #[test]
    fn force_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".flake8"), "old").unwrap();
        let planned = plan_config_files(&CheckerRegistry::with_builtins().unwrap());

        let outcome = write_config_files(&planned, temp.path(), true).unwrap();

        assert!(outcome.skipped.is_empty());
        assert!(fs::read_to_string(temp.path().join(".flake8"))
            .unwrap()
            .starts_with("[flake8]"));
    }
}
