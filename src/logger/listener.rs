//! Listener decorator that records every lifecycle event in the activity log
//! before forwarding it.

#![allow(missing_docs)]

use crate::core::errors::Result;
use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use crate::model::coverage::CoverageReport;
use crate::model::outcome::{SuiteInfo, TestOutcome, TestStatus};
use crate::model::result::TestRunResult;
use crate::report::percent::percent;
use crate::report::renderer::RunListener;

/// Wraps a listener and writes one activity-log entry per event it sees.
pub struct LoggingListener<L> {
    inner: L,
    log: JsonlWriter,
}

impl<L: RunListener> LoggingListener<L> {
    pub fn new(inner: L, log: JsonlWriter) -> Self {
        Self { inner, log }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Log the error, then hand it back.
    fn forward(&mut self, outcome: Result<()>) -> Result<()> {
        if let Err(error) = &outcome {
            self.log.write_entry(&LogEntry::from_error(error));
        }
        outcome
    }
}

fn status_severity(status: TestStatus) -> Severity {
    match status {
        TestStatus::Passed => Severity::Info,
        TestStatus::Skipped | TestStatus::Incomplete | TestStatus::Risky => Severity::Warning,
        TestStatus::Failed | TestStatus::Errored => Severity::Critical,
    }
}

impl<L: RunListener> RunListener for LoggingListener<L> {
    fn on_run_start(&mut self) -> Result<()> {
        self.log
            .write_entry(&LogEntry::new(EventType::RunStart, Severity::Info));
        let outcome = self.inner.on_run_start();
        self.forward(outcome)
    }

    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<()> {
        let mut entry = LogEntry::new(EventType::SuiteStart, Severity::Info);
        entry.tests = Some(suite.test_count as u64);
        entry.details = Some(suite.name.clone());
        self.log.write_entry(&entry);
        let outcome = self.inner.on_suite_start(suite);
        self.forward(outcome)
    }

    fn on_test_fault(&mut self, status: TestStatus) -> Result<()> {
        let mut entry = LogEntry::new(EventType::TestFault, status_severity(status));
        entry.status = Some(status.label().to_string());
        self.log.write_entry(&entry);
        let outcome = self.inner.on_test_fault(status);
        self.forward(outcome)
    }

    fn on_test_end(&mut self, outcome: &TestOutcome) -> Result<()> {
        let mut entry = LogEntry::new(EventType::TestEnd, status_severity(outcome.status));
        entry.test = Some(outcome.display_name());
        entry.status = Some(outcome.status.label().to_string());
        entry.assertions = Some(outcome.kind.assertion_count());
        entry.duration_ms = u64::try_from(outcome.elapsed.as_millis()).ok();
        self.log.write_entry(&entry);
        let forwarded = self.inner.on_test_end(outcome);
        self.forward(forwarded)
    }

    fn on_run_end(
        &mut self,
        result: &TestRunResult,
        coverage: Option<&CoverageReport>,
    ) -> Result<()> {
        let severity = if result.successful {
            Severity::Info
        } else {
            Severity::Critical
        };
        let mut entry = LogEntry::new(EventType::RunFinished, severity);
        entry.tests = Some(result.tests);
        entry.failures = Some(result.failures);
        entry.errors = Some(result.errors);
        entry.assertions = Some(result.assertions);
        entry.duration_ms = u64::try_from(result.elapsed.as_millis()).ok();
        self.log.write_entry(&entry);

        if let Some(summary) = coverage.and_then(|report| report.summary().ok()) {
            let mut entry = LogEntry::new(EventType::CoverageSummary, Severity::Info);
            entry.coverage_pct = Some(percent(summary.executed_lines, summary.executable_lines));
            entry.details = Some(format!(
                "{}/{}",
                summary.executed_lines, summary.executable_lines
            ));
            self.log.write_entry(&entry);
        }

        let outcome = self.inner.on_run_end(result, coverage);
        let outcome = self.forward(outcome);
        self.log.flush();
        outcome
    }
}
