//! Visual theme and styling.

use crate::checker::CheckStatus;
use console::Style;

/// pycc's visual theme.
#[derive(Debug, Clone)]
pub struct PyccTheme {
    /// Style for passed checks and the success verdict (green).
    pub success: Style,
    /// Style for skipped checks and warnings (yellow).
    pub warning: Style,
    /// Style for failed and errored checks (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for section headers (yellow bold).
    pub header: Style,
    /// Style for category headings in listings (bold cyan).
    pub category: Style,
}

impl Default for PyccTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PyccTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().yellow().bold(),
            category: Style::new().cyan().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            category: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a message with the glyph and color of a check status.
    pub fn format_status(&self, status: CheckStatus, msg: &str) -> String {
        match status {
            CheckStatus::Passed => self.format_success(msg),
            CheckStatus::Failed | CheckStatus::Error => self.format_error(msg),
            CheckStatus::Skipped => self.format_skipped(msg),
        }
    }

    /// Format a section header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(format!("=== {} ===", title)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = PyccTheme::plain().format_success("black passed");
        assert_eq!(msg, "✓ black passed");
    }

    #[test]
    fn theme_formats_error() {
        let msg = PyccTheme::plain().format_error("flake8 failed");
        assert_eq!(msg, "✗ flake8 failed");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = PyccTheme::plain().format_warning("Caution");
        assert!(msg.contains("⚠"));
    }

    #[test]
    fn status_glyphs() {
        let theme = PyccTheme::plain();
        assert!(theme.format_status(CheckStatus::Passed, "x").starts_with('✓'));
        assert!(theme.format_status(CheckStatus::Failed, "x").starts_with('✗'));
        assert!(theme.format_status(CheckStatus::Error, "x").starts_with('✗'));
        assert!(theme.format_status(CheckStatus::Skipped, "x").starts_with('○'));
    }

    #[test]
    fn header_is_banner() {
        assert_eq!(PyccTheme::plain().format_header("Summary"), "=== Summary ===");
    }

    #[test]
    fn default_theme_creates_without_panic() {
        let theme = PyccTheme::default();
        let _ = theme.format_success("test");
        let _ = theme.category.apply_to("FORMAT CHECKS");
    }
}
