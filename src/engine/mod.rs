//! Check execution.
//!
//! The [`Engine`] resolves a [`Selection`] against a registry and runs each
//! checker in turn. Every invocation is isolated: it happens on a worker
//! thread watched by the engine, so a hung adapter is abandoned after its
//! timeout, and a panicking or failing adapter becomes an error result
//! instead of taking the run down.

pub mod selection;
pub mod summary;

pub use selection::Selection;
pub use summary::{RunReport, RunSummary};

use crate::checker::{timeout_message, CheckContext, CheckResult, Checker};
use crate::error::Result;
use crate::registry::{CheckerInfo, CheckerRegistry};
use crate::shell::CancelToken;
use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Per-check time limit used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Extra time the watchdog gives a checker beyond its own timeout.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(2);

/// Progress events emitted while a run executes.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A checker is about to run.
    CheckStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A checker finished (including skipped ones).
    CheckFinished { result: &'a CheckResult },
}

/// Runs selections of checkers from a registry.
pub struct Engine<'a> {
    registry: &'a CheckerRegistry,
    disabled: HashSet<String>,
    grace: Duration,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a CheckerRegistry) -> Self {
        Self {
            registry,
            disabled: HashSet::new(),
            grace: DEFAULT_GRACE,
        }
    }

    /// Exclude checkers from category and `All` selections.
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled = names.into_iter().map(Into::into).collect();
        self
    }

    /// Change how long the watchdog waits past the timeout.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Resolve a selection to the checkers it would run, in order.
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<Arc<dyn Checker>>> {
        selection::resolve(self.registry, selection, &self.disabled)
    }

    /// Run a selection against `project_path`.
    pub fn run(
        &self,
        selection: &Selection,
        project_path: &Path,
        timeout: Duration,
    ) -> Result<RunReport> {
        self.run_with_progress(selection, project_path, timeout, |_| {})
    }

    /// Run a selection, reporting progress through `on_progress`.
    ///
    /// # Errors
    ///
    /// Only selection problems (an unknown checker name) are errors, and
    /// they are reported before any checker runs.
    pub fn run_with_progress(
        &self,
        selection: &Selection,
        project_path: &Path,
        timeout: Duration,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<RunReport> {
        let checkers = self.resolve(selection)?;
        let total = checkers.len();
        let mut results = Vec::with_capacity(total);

        for (index, checker) in checkers.into_iter().enumerate() {
            on_progress(RunProgress::CheckStarting {
                name: checker.name(),
                index,
                total,
            });

            let result = self.run_one(checker, project_path, timeout);
            on_progress(RunProgress::CheckFinished { result: &result });
            results.push(result);
        }

        Ok(RunReport::new(results))
    }

    /// Run a single checker with availability gating, timeout and fault
    /// isolation. Never fails; every outcome is a [`CheckResult`].
    pub fn run_one(
        &self,
        checker: Arc<dyn Checker>,
        project_path: &Path,
        timeout: Duration,
    ) -> CheckResult {
        let name = checker.name().to_string();

        if !checker.is_available(project_path) {
            info!(checker = %name, "not available, skipping");
            return CheckResult::skipped(&name);
        }

        let start = Instant::now();
        let result = self.invoke(checker, &name, project_path, timeout);
        let result = result.with_name(&name).with_duration(start.elapsed());

        info!(
            checker = %name,
            status = %result.status(),
            duration_ms = result.duration().as_millis() as u64,
            "check finished"
        );
        result
    }

    fn invoke(
        &self,
        checker: Arc<dyn Checker>,
        name: &str,
        project_path: &Path,
        timeout: Duration,
    ) -> CheckResult {
        let cancel = CancelToken::new();
        let ctx = CheckContext::with_cancel(project_path, timeout, cancel.clone());
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name(format!("pycc-{name}"))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| checker.check(&ctx)));
                let _ = tx.send(outcome);
            });

        let worker = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                return CheckResult::error(name, format!("Unexpected error: {e}"));
            }
        };

        match rx.recv_timeout(timeout.saturating_add(self.grace)) {
            Ok(outcome) => {
                let _ = worker.join();
                settle(name, outcome)
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(checker = %name, ?timeout, "watchdog expired, cancelling");
                cancel.cancel();
                // A cooperative checker stops promptly once cancelled and
                // hands back whatever output it gathered.
                let partial = match rx.recv_timeout(self.grace) {
                    Ok(Ok(Ok(result))) => result.output().to_string(),
                    _ => {
                        debug!(checker = %name, "worker abandoned");
                        String::new()
                    }
                };
                CheckResult::error(name, timeout_message(timeout)).with_output(partial)
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = worker.join();
                CheckResult::error(name, "Unexpected error: checker thread exited without a result")
            }
        }
    }

    /// Describe every registered checker.
    pub fn list_checkers(&self, project_path: &Path) -> Vec<CheckerInfo> {
        self.registry.list_checkers(project_path)
    }
}

type Outcome = std::thread::Result<Result<CheckResult>>;

fn settle(name: &str, outcome: Outcome) -> CheckResult {
    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!(checker = %name, error = %e, "checker failed");
            CheckResult::error(name, format!("Unexpected error: {e}"))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(checker = %name, %message, "checker panicked");
            CheckResult::error(name, format!("Unexpected error: {message}"))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "checker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Category, CheckStatus};
    use crate::error::PyccError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Pass,
        Fail(&'static str),
        Sleep(Duration),
        Err,
        Panic,
        WrongName,
    }

    struct FakeChecker {
        name: &'static str,
        available: bool,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl FakeChecker {
        fn new(name: &'static str, behavior: Behavior) -> Self {
            Self {
                name,
                available: true,
                behavior,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn unavailable(mut self) -> Self {
            self.available = false;
            self
        }
    }

    impl Checker for FakeChecker {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fake"
        }

        fn is_available(&self, _project_path: &Path) -> bool {
            self.available
        }

        fn check(&self, ctx: &CheckContext) -> Result<CheckResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Pass => Ok(CheckResult::passed(self.name, "clean")),
                Behavior::Fail(msg) => Ok(CheckResult::failed(self.name, "", *msg)),
                Behavior::Sleep(d) => {
                    let until = Instant::now() + *d;
                    while Instant::now() < until && !ctx.cancel_token().is_cancelled() {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Ok(CheckResult::passed(self.name, "slept"))
                }
                Behavior::Err => Err(PyccError::CommandFailed {
                    command: "fake".into(),
                    message: "spawn failed".into(),
                }),
                Behavior::Panic => panic!("adapter bug"),
                Behavior::WrongName => Ok(CheckResult::passed("someone-else", "")),
            }
        }
    }

    fn registry_with(checkers: Vec<FakeChecker>) -> CheckerRegistry {
        let mut registry = CheckerRegistry::new();
        for checker in checkers {
            registry.register(Box::new(checker)).unwrap();
        }
        registry
    }

    fn project() -> &'static Path {
        Path::new(".")
    }

    #[test]
    fn unavailable_checker_is_skipped_without_invocation() {
        let spy = FakeChecker::new("bandit", Behavior::Pass).unavailable();
        let calls = Arc::clone(&spy.calls);
        let registry = registry_with(vec![spy]);

        let report = Engine::new(&registry)
            .run(&Selection::names(["bandit"]), project(), DEFAULT_TIMEOUT)
            .unwrap();

        let result = &report.results()[0];
        assert_eq!(result.status(), CheckStatus::Skipped);
        assert_eq!(result.duration(), Duration::ZERO);
        assert!(result.output().is_empty());
        assert!(result.error_text().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.summary().skipped, 1);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn results_follow_selection_order() {
        let registry = registry_with(vec![
            FakeChecker::new("black", Behavior::Sleep(Duration::from_millis(50))),
            FakeChecker::new("flake8", Behavior::Pass),
        ]);

        let report = Engine::new(&registry)
            .run(&Selection::names(["flake8", "black"]), project(), DEFAULT_TIMEOUT)
            .unwrap();

        let names: Vec<_> = report.results().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["flake8", "black"]);
    }

    #[test]
    fn mixed_outcomes_fail_the_run() {
        let registry = registry_with(vec![
            FakeChecker::new("black", Behavior::Pass),
            FakeChecker::new("flake8", Behavior::Fail("E501 line too long")),
        ]);

        let report = Engine::new(&registry)
            .run(&Selection::names(["black", "flake8"]), project(), DEFAULT_TIMEOUT)
            .unwrap();

        assert_eq!(report.summary().passed, 1);
        assert_eq!(report.summary().failed, 1);
        assert_eq!(report.results()[1].error_text(), "E501 line too long");
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn unknown_name_aborts_before_running() {
        let spy = FakeChecker::new("black", Behavior::Pass);
        let calls = Arc::clone(&spy.calls);
        let registry = registry_with(vec![spy]);

        let err = Engine::new(&registry)
            .run(
                &Selection::names(["black", "nonexistent"]),
                project(),
                DEFAULT_TIMEOUT,
            )
            .unwrap_err();

        assert!(matches!(err, PyccError::CheckerNotFound { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn adapter_error_becomes_error_result() {
        let registry = registry_with(vec![FakeChecker::new("mypy", Behavior::Err)]);

        let report = Engine::new(&registry)
            .run(&Selection::All, project(), DEFAULT_TIMEOUT)
            .unwrap();

        let result = &report.results()[0];
        assert_eq!(result.status(), CheckStatus::Error);
        assert!(result.error_text().starts_with("Unexpected error:"));
        assert!(result.error_text().contains("spawn failed"));
    }

    #[test]
    fn panic_is_contained() {
        let registry = registry_with(vec![
            FakeChecker::new("pylint", Behavior::Panic),
            FakeChecker::new("isort", Behavior::Pass),
        ]);

        let report = Engine::new(&registry)
            .run(&Selection::All, project(), DEFAULT_TIMEOUT)
            .unwrap();

        assert_eq!(report.results()[0].status(), CheckStatus::Error);
        assert!(report.results()[0].error_text().contains("adapter bug"));
        assert_eq!(report.results()[1].status(), CheckStatus::Passed);
    }

    #[test]
    fn watchdog_times_out_hung_checker() {
        let registry = registry_with(vec![FakeChecker::new(
            "slow",
            Behavior::Sleep(Duration::from_secs(30)),
        )]);
        let engine = Engine::new(&registry).with_grace(Duration::from_millis(100));

        let started = Instant::now();
        let report = engine
            .run(&Selection::All, project(), Duration::from_millis(200))
            .unwrap();

        let result = &report.results()[0];
        assert_eq!(result.status(), CheckStatus::Error);
        assert!(result.error_text().contains("timed out"));
        assert_eq!(result.output(), "slept");
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn unbounded_timeout_still_runs_checker() {
        let registry = registry_with(vec![FakeChecker::new("black", Behavior::Pass)]);

        let report = Engine::new(&registry)
            .run(&Selection::All, project(), Duration::from_secs(u64::MAX))
            .unwrap();

        assert_eq!(report.results()[0].status(), CheckStatus::Passed);
    }

    #[test]
    fn engine_stamps_name_and_duration() {
        let registry = registry_with(vec![
            FakeChecker::new("odd", Behavior::WrongName),
            FakeChecker::new("slowish", Behavior::Sleep(Duration::from_millis(30))),
        ]);

        let report = Engine::new(&registry)
            .run(&Selection::All, project(), DEFAULT_TIMEOUT)
            .unwrap();

        assert_eq!(report.results()[0].name(), "odd");
        assert!(report.results()[1].duration() >= Duration::from_millis(30));
    }

    #[test]
    fn disabled_checkers_leave_all_selection() {
        let registry = registry_with(vec![
            FakeChecker::new("black", Behavior::Pass),
            FakeChecker::new("safety", Behavior::Pass),
        ]);

        let report = Engine::new(&registry)
            .with_disabled(["safety"])
            .run(&Selection::All, project(), DEFAULT_TIMEOUT)
            .unwrap();

        assert_eq!(report.summary().total, 1);
        assert_eq!(report.results()[0].name(), "black");
    }

    #[test]
    fn progress_reports_each_check() {
        let registry = registry_with(vec![
            FakeChecker::new("black", Behavior::Pass),
            FakeChecker::new("isort", Behavior::Pass).unavailable(),
        ]);
        let mut events = Vec::new();

        Engine::new(&registry)
            .run_with_progress(&Selection::All, project(), DEFAULT_TIMEOUT, |p| {
                events.push(match p {
                    RunProgress::CheckStarting { name, index, total } => {
                        format!("start {name} {index}/{total}")
                    }
                    RunProgress::CheckFinished { result } => {
                        format!("done {} {}", result.name(), result.status())
                    }
                })
            })
            .unwrap();

        assert_eq!(
            events,
            [
                "start black 0/2",
                "done black passed",
                "start isort 1/2",
                "done isort skipped",
            ]
        );
    }

    #[test]
    fn format_category_against_builtins_only_touches_format_tools() {
        let registry = CheckerRegistry::with_builtins().unwrap();
        let checkers = Engine::new(&registry)
            .resolve(&Selection::Categories(vec![Category::Format]))
            .unwrap();

        let names: Vec<_> = checkers.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["black", "isort"]);
    }
}
