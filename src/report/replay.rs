//! Drive a listener from a recorded transcript, the way a live test driver
//! would.

#![allow(missing_docs)]

use crate::core::errors::Result;
use crate::model::result::{RunTally, TestRunResult};
use crate::model::transcript::{RunEvent, RunTranscript};
use crate::report::renderer::RunListener;

/// Feed every event of `transcript` to `listener`, then end the run.
///
/// The transcript's own result is used when present; otherwise one is tallied
/// from its `test_ended` events. Coverage is passed on only when
/// `include_coverage` is set and the transcript carries a report.
pub fn replay<L: RunListener + ?Sized>(
    transcript: &RunTranscript,
    listener: &mut L,
    include_coverage: bool,
) -> Result<TestRunResult> {
    let mut tally = RunTally::new();

    listener.on_run_start()?;
    for event in &transcript.events {
        match event {
            RunEvent::SuiteStarted(suite) => listener.on_suite_start(suite)?,
            RunEvent::TestFault { status } => listener.on_test_fault(*status)?,
            RunEvent::TestEnded(outcome) => {
                tally.record(outcome);
                listener.on_test_end(outcome)?;
            }
        }
    }

    let result = transcript
        .result
        .clone()
        .unwrap_or_else(|| tally.finish(transcript.peak_memory_bytes));
    let coverage = transcript.coverage.as_ref().filter(|_| include_coverage);
    listener.on_run_end(&result, coverage)?;
    Ok(result)
}
