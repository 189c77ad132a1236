//! Aggregate counts over a run.

use crate::checker::{CheckResult, CheckStatus};
use serde::Serialize;

/// Per-status counts of a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub error: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            match result.status() {
                CheckStatus::Passed => summary.passed += 1,
                CheckStatus::Failed => summary.failed += 1,
                CheckStatus::Error => summary.error += 1,
                CheckStatus::Skipped => summary.skipped += 1,
            }
            summary
        })
    }

    /// Failed plus errored checks.
    pub fn problems(&self) -> usize {
        self.failed + self.error
    }

    pub fn is_success(&self) -> bool {
        self.problems() == 0
    }
}

/// Ordered results of one run and their summary.
#[derive(Debug, Clone)]
pub struct RunReport {
    results: Vec<CheckResult>,
    summary: RunSummary,
}

impl RunReport {
    pub fn new(results: Vec<CheckResult>) -> Self {
        let summary = RunSummary::from_results(&results);
        Self { results, summary }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// No check failed or errored.
    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> Vec<CheckResult> {
        vec![
            CheckResult::passed("black", ""),
            CheckResult::failed("flake8", "", "E501 line too long"),
            CheckResult::error("mypy", "crashed"),
            CheckResult::skipped("bandit"),
            CheckResult::passed("isort", ""),
        ]
    }

    #[test]
    fn counts_each_status() {
        let summary = RunSummary::from_results(&mixed());
        assert_eq!(
            summary,
            RunSummary {
                total: 5,
                passed: 2,
                failed: 1,
                error: 1,
                skipped: 1,
            }
        );
        assert_eq!(
            summary.total,
            summary.passed + summary.failed + summary.error + summary.skipped
        );
    }

    #[test]
    fn empty_run_is_success() {
        let report = RunReport::new(Vec::new());
        assert_eq!(report.summary().total, 0);
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn skipped_does_not_fail_the_run() {
        let report = RunReport::new(vec![CheckResult::skipped("bandit")]);
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn error_alone_fails_the_run() {
        let report = RunReport::new(vec![
            CheckResult::passed("black", ""),
            CheckResult::error("mypy", "timed out"),
        ]);
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn report_keeps_result_order() {
        let report = RunReport::new(mixed());
        let names: Vec<_> = report.results().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["black", "flake8", "mypy", "bandit", "isort"]);
    }
}
