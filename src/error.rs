//! Error types for pycc operations.
//!
//! This module defines [`PyccError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-checker outcomes (failed, errored, skipped) are never errors; they are
//!   captured in a [`CheckResult`](crate::checker::CheckResult)
//! - `PyccError` covers configuration and selection problems that abort a run
//!   before any checker executes
//! - Use `anyhow::Error` (via `PyccError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pycc operations.
#[derive(Debug, Error)]
pub enum PyccError {
    /// A checker with the same name is already registered.
    #[error("Checker '{name}' is already registered")]
    DuplicateChecker { name: String },

    /// No checker is registered under the requested name.
    #[error("Checker '{name}' not found")]
    CheckerNotFound { name: String },

    /// Category label is not one of the fixed categories.
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// Project path is missing or not a directory.
    #[error("Project path '{}' {}", .path.display(), .reason)]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Nothing was selected to run.
    #[error("No checkers selected. Use --all, --check, or specify categories.")]
    NoSelection,

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {}: {}", .path.display(), .message)]
    ConfigParseError { path: PathBuf, message: String },

    /// An external command could not be started or waited on.
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pycc operations.
pub type Result<T> = std::result::Result<T, PyccError>;
