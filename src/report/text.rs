//! Human-readable report formatter.

use super::{ReportContext, ReportFormatter};
use crate::checker::{CheckResult, CheckStatus};
use crate::ui::{format_duration, OutputMode, PyccTheme};
use std::io::Write;

/// Formats run reports for terminal display.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    theme: PyccTheme,
    mode: OutputMode,
}

impl TextFormatter {
    pub fn new(theme: PyccTheme, mode: OutputMode) -> Self {
        Self { theme, mode }
    }

    /// Uncolored formatter, used for tests and piped output.
    pub fn plain(mode: OutputMode) -> Self {
        Self::new(PyccTheme::plain(), mode)
    }

    fn status_line(&self, result: &CheckResult) -> String {
        let label = match result.status() {
            CheckStatus::Skipped => format!("{} skipped", result.name()),
            status => format!(
                "{} {} ({})",
                result.name(),
                status,
                format_duration(result.duration())
            ),
        };
        self.theme.format_status(result.status(), &label)
    }

    fn write_result<W: Write>(&self, result: &CheckResult, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.status_line(result))?;

        if result.status().is_problem() {
            write_indented(writer, result.error_text(), |line| {
                self.theme.error.apply_to(line).to_string()
            })?;
        }

        if self.mode.shows_command_output() && result.error_text() != result.output().trim_end() {
            write_indented(writer, result.output(), |line| {
                self.theme.dim.apply_to(line).to_string()
            })?;
        }

        Ok(())
    }

    fn write_summary<W: Write>(&self, ctx: &ReportContext<'_>, writer: &mut W) -> std::io::Result<()> {
        let s = ctx.summary;
        writeln!(writer)?;
        writeln!(writer, "{}", self.theme.format_header("Summary"))?;
        writeln!(writer)?;
        writeln!(writer, "Total checks: {}", s.total)?;
        writeln!(writer, "{}", self.theme.success.apply_to(format!("Passed: {}", s.passed)))?;
        writeln!(writer, "{}", self.theme.error.apply_to(format!("Failed: {}", s.failed)))?;
        writeln!(writer, "{}", self.theme.error.apply_to(format!("Errors: {}", s.error)))?;
        writeln!(writer, "{}", self.theme.warning.apply_to(format!("Skipped: {}", s.skipped)))?;
        Ok(())
    }

    fn write_verdict<W: Write>(&self, ctx: &ReportContext<'_>, writer: &mut W) -> std::io::Result<()> {
        let problems = ctx.summary.problems();
        if problems == 0 {
            writeln!(writer, "{}", self.theme.success.apply_to("All checks passed!"))
        } else {
            writeln!(
                writer,
                "{}",
                self.theme.error.apply_to(format!("{} check(s) failed", problems))
            )
        }
    }
}

fn write_indented<W, F>(writer: &mut W, text: &str, style: F) -> std::io::Result<()>
where
    W: Write,
    F: Fn(&str) -> String,
{
    for line in text.trim_end().lines() {
        writeln!(writer, "    {}", style(line))?;
    }
    Ok(())
}

impl ReportFormatter for TextFormatter {
    fn format<W: Write>(&self, ctx: &ReportContext<'_>, writer: &mut W) -> std::io::Result<()> {
        for result in ctx.results {
            if self.mode.shows_all_checks() || result.status().is_problem() {
                self.write_result(result, writer)?;
            }
        }

        if self.mode.shows_status() {
            self.write_summary(ctx, writer)?;
            writeln!(writer)?;
        }

        self.write_verdict(ctx, writer)
    }
}
