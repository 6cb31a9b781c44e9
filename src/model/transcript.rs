//! Recorded lifecycle events of one run, replayable through a listener.

#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, RpError};
use crate::model::coverage::CoverageReport;
use crate::model::outcome::{SuiteInfo, TestOutcome, TestStatus};
use crate::model::result::TestRunResult;

/// One lifecycle event emitted by the test driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    SuiteStarted(SuiteInfo),
    /// The driver flagged the running test before it ended.
    TestFault { status: TestStatus },
    TestEnded(TestOutcome),
}

/// A run as recorded by (or for) a driver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunTranscript {
    #[serde(default)]
    pub events: Vec<RunEvent>,
    /// Explicit result snapshot; derived from the events when absent.
    #[serde(default)]
    pub result: Option<TestRunResult>,
    /// Present when coverage was collected for this run.
    #[serde(default)]
    pub coverage: Option<CoverageReport>,
    /// Used only when `result` is derived.
    #[serde(default)]
    pub peak_memory_bytes: u64,
}

impl RunTranscript {
    /// Read a transcript from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| RpError::io(path, source))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Read a standalone coverage report from a JSON file.
pub fn load_coverage(path: &Path) -> Result<CoverageReport> {
    let raw = fs::read_to_string(path).map_err(|source| RpError::io(path, source))?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_parses_tagged_events() {
        let raw = r#"{
            "events": [
                {"event": "suite_started", "name": "all", "test_count": 2},
                {"event": "test_fault", "status": "failed"},
                {"event": "test_ended", "name": "a", "status": "failed", "kind": "case", "assertions": 1},
                {"event": "test_ended", "name": "b.phpt", "status": "passed", "kind": "script"}
            ]
        }"#;
        let transcript: RunTranscript = serde_json::from_str(raw).expect("transcript should parse");
        assert_eq!(transcript.events.len(), 4);
        assert!(transcript.result.is_none());
        assert!(transcript.coverage.is_none());
        assert!(matches!(
            transcript.events[1],
            RunEvent::TestFault {
                status: TestStatus::Failed
            }
        ));
    }

    #[test]
    fn from_path_reports_missing_file_as_io() {
        let err = RunTranscript::from_path(Path::new("/nonexistent/run.json")).unwrap_err();
        assert_eq!(err.code(), "RP-3001");
    }

    #[test]
    fn from_path_reports_bad_json_as_serialization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, "{ not json").unwrap();
        let err = RunTranscript::from_path(&path).unwrap_err();
        assert_eq!(err.code(), "RP-2101");
    }
}
