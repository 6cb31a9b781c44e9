//! Live progress: one glyph per finished test, running counters, and
//! passthrough of captured test output.

#![allow(missing_docs)]

use crate::core::errors::Result;
use crate::model::outcome::{SuiteInfo, TestOutcome, TestStatus};
use crate::report::sink::{Sink, Style};

/// Per-run progress state. Build a fresh one for every run.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    glyph: char,
    planned_tests: Option<usize>,
    tests_run: u64,
    assertions: u64,
    last_test_failed: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new('.')
    }
}

/// Glyph and style written when the driver flags a test, if any.
#[must_use]
pub const fn fault_glyph(status: TestStatus) -> Option<(char, Style)> {
    match status {
        TestStatus::Passed => None,
        TestStatus::Errored => Some(('E', Style::Failure)),
        TestStatus::Failed => Some(('F', Style::Alarm)),
        TestStatus::Incomplete => Some(('I', Style::Warning)),
        TestStatus::Risky => Some(('R', Style::Warning)),
        TestStatus::Skipped => Some(('S', Style::Warning)),
    }
}

impl ProgressReporter {
    #[must_use]
    pub fn new(glyph: char) -> Self {
        Self {
            glyph,
            planned_tests: None,
            tests_run: 0,
            assertions: 0,
            last_test_failed: false,
        }
    }

    /// Test count of the first suite announced; later suites are nested.
    #[must_use]
    pub const fn planned_tests(&self) -> Option<usize> {
        self.planned_tests
    }

    #[must_use]
    pub const fn tests_run(&self) -> u64 {
        self.tests_run
    }

    #[must_use]
    pub const fn assertions(&self) -> u64 {
        self.assertions
    }

    pub fn on_suite_start(&mut self, suite: &SuiteInfo) {
        if self.planned_tests.is_none() {
            self.planned_tests = Some(suite.test_count);
        }
    }

    /// Write the fault glyph for the running test. Suppresses the success
    /// glyph of the following `on_test_end`.
    pub fn on_test_fault(&mut self, status: TestStatus, sink: &mut impl Sink) -> Result<()> {
        let Some((glyph, style)) = fault_glyph(status) else {
            return Ok(());
        };
        self.last_test_failed = true;
        sink.write_styled(style, glyph.encode_utf8(&mut [0; 4]))
    }

    pub fn on_test_end(&mut self, outcome: &TestOutcome, sink: &mut impl Sink) -> Result<()> {
        if !self.last_test_failed {
            sink.write_styled(Style::Success, self.glyph.encode_utf8(&mut [0; 4]))?;
        }

        self.assertions += outcome.kind.assertion_count();
        self.tests_run += 1;
        self.last_test_failed = false;

        if let Some(output) = outcome.kind.passthrough_output() {
            sink.write(output)?;
        }
        Ok(())
    }
}
