//! Availability probes.
//!
//! Whether a tool "is available" means different things for different tools:
//! some only need an executable on the search path, some need to answer
//! `--version`, and some are Python modules that must be importable. Each
//! adapter picks its own [`Availability`] strategy.

use crate::shell::{self, CommandOptions};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

/// Limit for probe commands such as `tool --version`.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Interpreters tried, in order, for module probes.
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Strategy used to decide whether a tool can currently be run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Availability {
    /// Always runnable (in-process checks, shell builtins).
    Always,
    /// The program resolves to an executable file.
    Path,
    /// The program resolves and `<program> --version` exits 0.
    #[default]
    Version,
    /// `python -c "import <module>"` exits 0.
    Module(String),
}

impl Availability {
    /// Probe the environment. Never fails; absence is `false`.
    pub fn probe(&self, program: &str, project_path: &Path) -> bool {
        let available = match self {
            Self::Always => true,
            Self::Path => {
                shell::resolve_tool_path(program, &shell::search_path(project_path)).is_some()
            }
            Self::Version => version_output(program, project_path).is_some(),
            Self::Module(module) => module_importable(module, project_path),
        };
        tracing::debug!(program, strategy = %self, available, "availability probe");
        available
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Path => f.write_str("path"),
            Self::Version => f.write_str("version"),
            Self::Module(module) => write!(f, "module:{module}"),
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(Self::Always),
            "path" => Ok(Self::Path),
            "version" => Ok(Self::Version),
            other => match other.strip_prefix("module:") {
                Some(module) if !module.trim().is_empty() => {
                    Ok(Self::Module(module.trim().to_string()))
                }
                _ => Err(format!(
                    "unknown availability '{}' (expected always, path, version or module:<name>)",
                    s
                )),
            },
        }
    }
}

impl TryFrom<String> for Availability {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Run `<program> --version` and return its combined output on success.
fn version_output(program: &str, project_path: &Path) -> Option<String> {
    let resolved = shell::resolve_tool_path(program, &shell::search_path(project_path))?;
    let options = CommandOptions {
        cwd: Some(project_path.to_path_buf()),
        timeout: Some(PROBE_TIMEOUT),
        ..Default::default()
    };
    let result = shell::execute(&resolved, &["--version"], &options).ok()?;
    result
        .success()
        .then(|| format!("{}{}", result.stdout, result.stderr))
}

fn module_importable(module: &str, project_path: &Path) -> bool {
    let entries = shell::search_path(project_path);
    let Some(python) = PYTHON_CANDIDATES
        .iter()
        .find_map(|candidate| shell::resolve_tool_path(candidate, &entries))
    else {
        return false;
    };

    let options = CommandOptions {
        cwd: Some(project_path.to_path_buf()),
        timeout: Some(PROBE_TIMEOUT),
        ..Default::default()
    };
    let script = format!("import {module}");
    shell::execute(&python, &["-c", script.as_str()], &options)
        .map(|r| r.success())
        .unwrap_or(false)
}

/// Detect a tool's version from its `--version` output.
pub fn detect_version(program: &str, project_path: &Path) -> Option<String> {
    version_output(program, project_path).and_then(|out| extract_version(&out))
}

/// Extract the first dotted version number from tool output.
pub fn extract_version(output: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = VERSION_RE
        .get_or_init(|| Regex::new(r"\b(\d+\.\d+(?:\.\d+)?)").ok())
        .as_ref()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_strategies() {
        assert_eq!("always".parse::<Availability>(), Ok(Availability::Always));
        assert_eq!("path".parse::<Availability>(), Ok(Availability::Path));
        assert_eq!("version".parse::<Availability>(), Ok(Availability::Version));
        assert_eq!(
            "module:black".parse::<Availability>(),
            Ok(Availability::Module("black".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!("sometimes".parse::<Availability>().is_err());
        assert!("module:".parse::<Availability>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let strategy = Availability::Module("mypy".to_string());
        assert_eq!(strategy.to_string().parse::<Availability>(), Ok(strategy));
    }

    #[test]
    fn default_is_version_probe() {
        assert_eq!(Availability::default(), Availability::Version);
    }

    #[test]
    fn deserializes_from_yaml_string() {
        let strategy: Availability = serde_yaml::from_str("module:bandit").unwrap();
        assert_eq!(strategy, Availability::Module("bandit".to_string()));
    }

    #[test]
    fn extracts_versions_from_tool_banners() {
        assert_eq!(
            extract_version("black, 24.1.1 (compiled: yes)"),
            Some("24.1.1".to_string())
        );
        assert_eq!(
            extract_version("mypy 1.8.0 (compiled: yes)"),
            Some("1.8.0".to_string())
        );
        assert_eq!(extract_version("6.1.0"), Some("6.1.0".to_string()));
        assert_eq!(extract_version("no version here"), None);
    }

    #[test]
    fn always_is_available() {
        let temp = TempDir::new().unwrap();
        assert!(Availability::Always.probe("anything", temp.path()));
    }

    #[test]
    fn missing_program_is_not_available() {
        let temp = TempDir::new().unwrap();
        let program = "pycc-missing-tool-xyz";
        assert!(!Availability::Path.probe(program, temp.path()));
        assert!(!Availability::Version.probe(program, temp.path()));
    }

    #[cfg(unix)]
    #[test]
    fn path_probe_finds_sh() {
        let temp = TempDir::new().unwrap();
        assert!(Availability::Path.probe("sh", temp.path()));
    }

    #[cfg(unix)]
    #[test]
    fn version_probe_uses_project_virtualenv() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let bin = temp.path().join(".venv").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let tool = bin.join("fake-linter");
        std::fs::write(&tool, "#!/bin/sh\necho fake-linter 2.3.4\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(Availability::Version.probe("fake-linter", temp.path()));
        assert_eq!(
            detect_version("fake-linter", temp.path()),
            Some("2.3.4".to_string())
        );
    }
}
