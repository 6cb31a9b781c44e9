//! Per-test outcomes and suite descriptors delivered by the test driver.

#![allow(missing_docs)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Classification of a finished test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Errored,
    Skipped,
    Incomplete,
    Risky,
}

impl TestStatus {
    /// Short label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Errored => "errored",
            Self::Skipped => "skipped",
            Self::Incomplete => "incomplete",
            Self::Risky => "risky",
        }
    }
}

/// What kind of test produced an outcome.
///
/// Only method-style cases track their own assertions and captured output;
/// script-driven tests always count as a single assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestKind {
    Case {
        #[serde(default)]
        assertions: u64,
        /// Stdout captured while the test ran.
        #[serde(default)]
        output: Option<String>,
        /// The test asserts on its own output, so it must not be echoed.
        #[serde(default)]
        expects_output: bool,
    },
    Script,
}

impl TestKind {
    /// Assertions this test contributes to the running total.
    #[must_use]
    pub const fn assertion_count(&self) -> u64 {
        match self {
            Self::Case { assertions, .. } => *assertions,
            Self::Script => 1,
        }
    }

    /// Output to echo into the report stream, if any.
    #[must_use]
    pub fn passthrough_output(&self) -> Option<&str> {
        match self {
            Self::Case {
                output: Some(output),
                expects_output: false,
                ..
            } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

/// A single finished test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, with = "super::duration_secs")]
    pub elapsed: Duration,
    pub status: TestStatus,
    #[serde(flatten)]
    pub kind: TestKind,
}

impl TestOutcome {
    /// A method-style case with no captured output.
    #[must_use]
    pub fn case(name: impl Into<String>, status: TestStatus, assertions: u64) -> Self {
        Self {
            name: name.into(),
            class: None,
            elapsed: Duration::ZERO,
            status,
            kind: TestKind::Case {
                assertions,
                output: None,
                expects_output: false,
            },
        }
    }

    /// A script-driven test.
    #[must_use]
    pub fn script(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            class: None,
            elapsed: Duration::ZERO,
            status,
            kind: TestKind::Script,
        }
    }

    /// Attach captured stdout; `expects_output` marks it as asserted-on.
    #[must_use]
    pub fn with_output(mut self, captured: impl Into<String>, expects_output: bool) -> Self {
        if let TestKind::Case {
            output,
            expects_output: expects,
            ..
        } = &mut self.kind
        {
            *output = Some(captured.into());
            *expects = expects_output;
        }
        self
    }

    /// `Class::name` when the class is known, otherwise the bare name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.class {
            Some(class) => format!("{class}::{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A suite announced by the driver before its tests run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteInfo {
    pub name: String,
    /// Number of tests the suite will run, nested suites included.
    pub test_count: usize,
}
