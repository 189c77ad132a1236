//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use super::{OutputMode, PyccTheme, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug)]
pub struct MockUI {
    mode: OutputMode,
    theme: PyccTheme,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    emitted: String,
}

impl Default for MockUI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::with_mode(OutputMode::Normal)
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: PyccTheme::plain(),
            messages: Vec::new(),
            successes: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            emitted: String::new(),
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Everything written through `emit`, concatenated.
    pub fn emitted(&self) -> &str {
        &self.emitted
    }

    /// Check if any message, success, warning, error or emitted text
    /// contains `needle`.
    pub fn has_output(&self, needle: &str) -> bool {
        self.emitted.contains(needle)
            || [&self.messages, &self.successes, &self.warnings, &self.errors]
                .iter()
                .any(|list| list.iter().any(|m| m.contains(needle)))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn theme(&self) -> &PyccTheme {
        &self.theme
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.messages.push(msg.to_string());
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.successes.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn emit(&mut self, text: &str) {
        self.emitted.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Running black");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");

        assert_eq!(ui.messages(), ["Running black"]);
        assert_eq!(ui.successes(), ["done"]);
        assert_eq!(ui.warnings(), ["careful"]);
        assert_eq!(ui.errors(), ["broken"]);
    }

    #[test]
    fn quiet_mode_drops_status_but_keeps_errors() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.message("hidden");
        ui.success("hidden");
        ui.error("shown");

        assert!(ui.messages().is_empty());
        assert!(ui.successes().is_empty());
        assert_eq!(ui.errors(), ["shown"]);
    }

    #[test]
    fn emit_ignores_mode() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.emit("{\"results\": []}\n");
        assert!(ui.has_output("results"));
    }

    #[test]
    fn set_output_mode_switches_filtering() {
        let mut ui = MockUI::new();
        ui.set_output_mode(OutputMode::Quiet);
        ui.message("hidden");
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(ui.messages().is_empty());
    }
}
