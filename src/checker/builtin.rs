//! The built-in tool catalog.
//!
//! Each built-in is a [`CommandChecker`] described by a [`BuiltinDef`] row.
//! Config-file templates live under `templates/` and are embedded at compile
//! time.

use super::command::{CommandChecker, ExitPolicy};
use super::{Category, ConfigFile};
use crate::error::Result;
use crate::registry::CheckerRegistry;
use anyhow::anyhow;
use include_dir::{include_dir, Dir};

/// Embedded config templates.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Exit-code handling of a built-in, in const-friendly form.
#[derive(Debug, Clone, Copy)]
pub enum BuiltinExit {
    Plain,
    ErrorCodes(&'static [i32]),
    PylintBitmask,
}

impl BuiltinExit {
    fn policy(self) -> ExitPolicy {
        match self {
            Self::Plain => ExitPolicy::Plain,
            Self::ErrorCodes(codes) => ExitPolicy::ErrorCodes(codes.to_vec()),
            Self::PylintBitmask => ExitPolicy::PylintBitmask,
        }
    }
}

/// A config file shipped with a built-in.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDef {
    /// Path inside `templates/`.
    pub template: &'static str,
    /// File written into the project.
    pub filename: &'static str,
    pub description: &'static str,
}

/// Static definition of one built-in checker.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinDef {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [&'static str],
    pub category: Category,
    pub exit: BuiltinExit,
    pub templates: &'static [TemplateDef],
}

impl BuiltinDef {
    /// Build the checker for this row, loading its templates.
    pub fn build(&self) -> Result<CommandChecker> {
        let mut checker = CommandChecker::new(self.name, self.name)
            .with_description(self.description)
            .with_args(self.args.iter().copied())
            .with_exit_policy(self.exit.policy());

        for def in self.templates {
            checker = checker.with_config_file(load_template(def)?);
        }
        Ok(checker)
    }
}

fn load_template(def: &TemplateDef) -> Result<ConfigFile> {
    let content = TEMPLATES_DIR
        .get_file(def.template)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| anyhow!("built-in template '{}' is missing", def.template))?;
    Ok(ConfigFile::new(def.filename, content, def.description))
}

/// The ten built-in tools, in registration order.
pub const BUILTIN_DEFS: &[BuiltinDef] = &[
    BuiltinDef {
        name: "black",
        description: "Code formatting with Black",
        args: &["--check", "."],
        category: Category::Format,
        // 123 is black's internal error
        exit: BuiltinExit::ErrorCodes(&[123]),
        templates: &[TemplateDef {
            template: "black.toml",
            filename: "pyproject.toml",
            description: "Black configuration in pyproject.toml",
        }],
    },
    BuiltinDef {
        name: "isort",
        description: "Import sorting with isort",
        args: &["--check-only", "."],
        category: Category::Format,
        exit: BuiltinExit::Plain,
        templates: &[TemplateDef {
            template: "isort.toml",
            filename: "pyproject.toml",
            description: "isort configuration in pyproject.toml",
        }],
    },
    BuiltinDef {
        name: "flake8",
        description: "Linting with Flake8",
        args: &["."],
        category: Category::Lint,
        exit: BuiltinExit::Plain,
        templates: &[TemplateDef {
            template: "flake8.ini",
            filename: ".flake8",
            description: "Flake8 configuration file",
        }],
    },
    BuiltinDef {
        name: "pylint",
        description: "Linting with Pylint",
        args: &["."],
        category: Category::Lint,
        exit: BuiltinExit::PylintBitmask,
        templates: &[TemplateDef {
            template: "pylint.toml",
            filename: "pyproject.toml",
            description: "Pylint configuration in pyproject.toml",
        }],
    },
    BuiltinDef {
        name: "mypy",
        description: "Type checking with MyPy",
        args: &["."],
        category: Category::Type,
        exit: BuiltinExit::ErrorCodes(&[2]),
        templates: &[TemplateDef {
            template: "mypy.toml",
            filename: "pyproject.toml",
            description: "MyPy configuration in pyproject.toml",
        }],
    },
    BuiltinDef {
        name: "bandit",
        description: "Security linting with Bandit",
        args: &["-r", "."],
        category: Category::Security,
        exit: BuiltinExit::ErrorCodes(&[2]),
        templates: &[TemplateDef {
            template: "bandit.yml",
            filename: ".bandit",
            description: "Bandit configuration file",
        }],
    },
    BuiltinDef {
        name: "safety",
        description: "Security vulnerability checking with Safety",
        args: &["check"],
        category: Category::Security,
        exit: BuiltinExit::Plain,
        templates: &[],
    },
    BuiltinDef {
        name: "pydocstyle",
        description: "Documentation style checking with Pydocstyle",
        args: &["."],
        category: Category::Docs,
        exit: BuiltinExit::ErrorCodes(&[2]),
        templates: &[TemplateDef {
            template: "pydocstyle.toml",
            filename: "pyproject.toml",
            description: "Pydocstyle configuration in pyproject.toml",
        }],
    },
    BuiltinDef {
        name: "vulture",
        description: "Dead code detection with Vulture",
        args: &[".", "--min-confidence=80"],
        category: Category::Complexity,
        // 3 means dead code found; 1 and 2 are bad input and bad arguments
        exit: BuiltinExit::ErrorCodes(&[1, 2]),
        templates: &[],
    },
    BuiltinDef {
        name: "radon",
        description: "Cyclomatic complexity with Radon",
        args: &["cc", ".", "--min=A"],
        category: Category::Complexity,
        exit: BuiltinExit::Plain,
        templates: &[],
    },
];

/// Register every built-in and its category membership.
pub fn register_builtins(registry: &mut CheckerRegistry) -> Result<()> {
    for def in BUILTIN_DEFS {
        registry.register(Box::new(def.build()?))?;
        registry.assign(def.category, def.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Checker;

    #[test]
    fn ten_builtins_with_unique_names() {
        let mut names: Vec<_> = BUILTIN_DEFS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 10);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn every_template_is_embedded() {
        for def in BUILTIN_DEFS {
            for template in def.templates {
                let file = load_template(template).unwrap();
                assert!(!file.content.is_empty(), "{} is empty", template.template);
            }
        }
    }

    #[test]
    fn black_checks_without_rewriting() {
        let black = BUILTIN_DEFS[0].build().unwrap();
        assert_eq!(black.args(), ["--check", "."]);
        assert_eq!(black.exit_policy(), &ExitPolicy::ErrorCodes(vec![123]));
    }

    #[test]
    fn flake8_manifest_targets_dotfile() {
        let flake8 = BUILTIN_DEFS
            .iter()
            .find(|d| d.name == "flake8")
            .unwrap()
            .build()
            .unwrap();
        let files = flake8.config_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, ".flake8");
        assert!(files[0].content.starts_with("[flake8]"));
    }

    #[test]
    fn tools_without_templates_have_empty_manifest() {
        for name in ["safety", "vulture", "radon"] {
            let def = BUILTIN_DEFS.iter().find(|d| d.name == name).unwrap();
            assert!(def.build().unwrap().config_files().is_empty());
        }
    }

    #[test]
    fn register_builtins_fills_categories() {
        let mut registry = CheckerRegistry::new();
        register_builtins(&mut registry).unwrap();

        assert_eq!(registry.len(), 10);
        assert_eq!(registry.members(Category::Format), ["black", "isort"]);
        assert_eq!(registry.members(Category::Complexity), ["vulture", "radon"]);
    }
}
