//! Run-level result snapshot and the tally that derives it from outcomes.

#![allow(missing_docs)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::outcome::{TestOutcome, TestStatus};

/// Immutable snapshot of a finished run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestRunResult {
    pub tests: u64,
    pub failures: u64,
    pub errors: u64,
    pub skipped: u64,
    pub incomplete: u64,
    pub risky: u64,
    pub assertions: u64,
    /// No failures and no errors.
    pub successful: bool,
    /// No unexpected side effects were detected.
    pub all_harmless: bool,
    pub all_completely_implemented: bool,
    pub none_skipped: bool,
    #[serde(with = "super::duration_secs")]
    pub elapsed: Duration,
    pub peak_memory_bytes: u64,
}

impl TestRunResult {
    /// Whether the run is clean enough for the plain green footer.
    #[must_use]
    pub const fn was_clean(&self) -> bool {
        self.successful && self.all_harmless && self.all_completely_implemented && self.none_skipped
    }
}

/// Accumulates outcomes into a [`TestRunResult`].
#[derive(Debug, Clone, Default)]
pub struct RunTally {
    tests: u64,
    failures: u64,
    errors: u64,
    skipped: u64,
    incomplete: u64,
    risky: u64,
    assertions: u64,
    elapsed: Duration,
}

impl RunTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished test.
    pub fn record(&mut self, outcome: &TestOutcome) {
        self.tests += 1;
        self.assertions += outcome.kind.assertion_count();
        self.elapsed += outcome.elapsed;
        match outcome.status {
            TestStatus::Passed => {}
            TestStatus::Failed => self.failures += 1,
            TestStatus::Errored => self.errors += 1,
            TestStatus::Skipped => self.skipped += 1,
            TestStatus::Incomplete => self.incomplete += 1,
            TestStatus::Risky => self.risky += 1,
        }
    }

    /// Number of tests recorded so far.
    #[must_use]
    pub const fn tests(&self) -> u64 {
        self.tests
    }

    /// Freeze the tally. Elapsed time is the sum of per-test times.
    #[must_use]
    pub fn finish(&self, peak_memory_bytes: u64) -> TestRunResult {
        TestRunResult {
            tests: self.tests,
            failures: self.failures,
            errors: self.errors,
            skipped: self.skipped,
            incomplete: self.incomplete,
            risky: self.risky,
            assertions: self.assertions,
            successful: self.failures == 0 && self.errors == 0,
            all_harmless: self.risky == 0,
            all_completely_implemented: self.incomplete == 0,
            none_skipped: self.skipped == 0,
            elapsed: self.elapsed,
            peak_memory_bytes,
        }
    }
}
