//! pycc - a single front end for Python code-quality tools.
//!
//! pycc runs formatters, linters, type checkers, security scanners,
//! documentation checkers and complexity analyzers against a Python project
//! and aggregates their outcomes into one report.
//!
//! # Modules
//!
//! - [`checker`] - The checker contract, results and the built-in tools
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Project configuration (`.pycc.yml`) and config plugins
//! - [`engine`] - Selection resolution and isolated check execution
//! - [`error`] - Error types and result aliases
//! - [`generate`] - Default config-file generation
//! - [`registry`] - The checker catalog and category map
//! - [`report`] - Text and JSON report formatting
//! - [`shell`] - External process execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use pycc::checker::Category;
//! use pycc::engine::{Engine, Selection};
//! use pycc::registry::CheckerRegistry;
//!
//! let registry = CheckerRegistry::with_builtins().unwrap();
//! let engine = Engine::new(&registry);
//!
//! let checkers = engine
//!     .resolve(&Selection::Categories(vec![Category::Format]))
//!     .unwrap();
//! let names: Vec<_> = checkers.iter().map(|c| c.name()).collect();
//! assert_eq!(names, ["black", "isort"]);
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod generate;
pub mod registry;
pub mod report;
pub mod shell;
pub mod ui;

pub use error::{PyccError, Result};
