//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing to the real terminal
//! - [`MockUI`] capturing everything for tests
//! - [`PyccTheme`] styling and [`OutputMode`] verbosity
//!
//! # Example
//!
//! ```
//! use pycc::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.message("hidden in quiet mode");
//! ui.error("always shown");
//! assert_eq!(ui.errors(), ["always shown"]);
//! ```

pub mod mock;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PyccTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Theme used for styled text.
    fn theme(&self) -> &PyccTheme;

    /// Display a status message (hidden in quiet mode).
    fn message(&mut self, msg: &str);

    /// Display a success message (hidden in quiet mode).
    fn success(&mut self, msg: &str);

    /// Display a warning message on stderr.
    fn warning(&mut self, msg: &str);

    /// Display an error message on stderr. Always shown.
    fn error(&mut self, msg: &str);

    /// Write already formatted output to stdout, regardless of mode.
    fn emit(&mut self, text: &str);
}
