//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which maps the
//! [`Action`](crate::cli::Action) chosen by the flags to its implementation
//! and handles the shared project setup.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod generate;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Project};
