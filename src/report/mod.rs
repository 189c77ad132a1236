//! Run report formatters.
//!
//! A formatter is a pure function of a [`ReportContext`]: the ordered
//! results, their summary, the project path and the run timestamp.

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::checker::CheckResult;
use crate::engine::{RunReport, RunSummary};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

/// Output format for run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a formatter renders.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub results: &'a [CheckResult],
    pub summary: &'a RunSummary,
    pub project_path: &'a Path,
    pub timestamp: DateTime<Utc>,
}

impl<'a> ReportContext<'a> {
    pub fn new(report: &'a RunReport, project_path: &'a Path, timestamp: DateTime<Utc>) -> Self {
        Self {
            results: report.results(),
            summary: report.summary(),
            project_path,
            timestamp,
        }
    }

    /// Timestamp as fractional seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> f64 {
        self.timestamp.timestamp_micros() as f64 / 1_000_000.0
    }
}

/// Trait for formatting run reports.
pub trait ReportFormatter {
    /// Format a report to the given writer.
    fn format<W: Write>(&self, ctx: &ReportContext<'_>, writer: &mut W) -> std::io::Result<()>;

    /// Format a report into a string.
    fn render(&self, ctx: &ReportContext<'_>) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.format(ctx, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn epoch_seconds_keeps_fraction() {
        let report = RunReport::new(Vec::new());
        let timestamp = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        let ctx = ReportContext::new(&report, Path::new("/proj"), timestamp);
        assert_eq!(ctx.epoch_seconds(), 1_700_000_000.5);
    }
}
