//! Configuration file discovery and loading.

use super::schema::PyccConfig;
use crate::error::{PyccError, Result};
use crate::registry::CheckerRegistry;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names looked up in the project root, in priority order.
pub const CONFIG_FILENAMES: &[&str] = &[".pycc.yml", "pycc.yml"];

/// Find the project's config file, if any.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load and parse a single config file.
///
/// # Errors
///
/// Returns `Io` if the file can't be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PyccConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`PyccConfig`].
///
/// An empty document is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PyccConfig> {
    if content.trim().is_empty() {
        return Ok(PyccConfig::default());
    }

    let config: PyccConfig =
        serde_yaml::from_str(content).map_err(|e| PyccError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if config.timeout == Some(0) {
        return Err(PyccError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: "timeout must be at least 1 second".to_string(),
        });
    }

    Ok(config)
}

/// Load the project's config, or the defaults when there is none.
pub fn load_project_config(project_root: &Path) -> Result<PyccConfig> {
    match find_config(project_root) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading project config");
            load_config_file(&path)
        }
        None => Ok(PyccConfig::default()),
    }
}

/// Register the config's plugin checkers after the built-ins.
///
/// # Errors
///
/// `DuplicateChecker` when a plugin reuses a registered name.
pub fn register_plugins(config: &PyccConfig, registry: &mut CheckerRegistry) -> Result<()> {
    for (name, plugin) in &config.checkers {
        registry.register(Box::new(plugin.to_checker(name)))?;
        if let Some(category) = plugin.category {
            registry.assign(category, name)?;
        }
    }

    for name in &config.disabled {
        if !registry.contains(name) {
            tracing::warn!(checker = %name, "disabled checker is not registered");
        }
    }

    Ok(())
}
