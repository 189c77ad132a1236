//! JSON report formatter.
//!
//! Field names are a compatibility contract for CI tooling.

use super::{ReportContext, ReportFormatter};
use crate::checker::CheckStatus;
use crate::engine::RunSummary;
use serde::Serialize;
use std::io::Write;

/// Formats run reports as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    project_path: String,
    timestamp: f64,
    results: Vec<JsonResult<'a>>,
    summary: &'a RunSummary,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    name: &'a str,
    status: CheckStatus,
    duration: f64,
    output: &'a str,
    error: &'a str,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, ctx: &ReportContext<'_>, writer: &mut W) -> std::io::Result<()> {
        let report = JsonReport {
            project_path: ctx.project_path.display().to_string(),
            timestamp: ctx.epoch_seconds(),
            results: ctx
                .results
                .iter()
                .map(|r| JsonResult {
                    name: r.name(),
                    status: r.status(),
                    duration: r.duration().as_secs_f64(),
                    output: r.output(),
                    error: r.error_text(),
                })
                .collect(),
            summary: ctx.summary,
        };

        serde_json::to_writer_pretty(&mut *writer, &report).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}
