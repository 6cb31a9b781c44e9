//! Report orchestration: the listener the driver calls into, and the
//! end-of-run header, footer and coverage block.

#![allow(missing_docs)]

use serde::Serialize;

use crate::core::config::Config;
use crate::core::errors::Result;
use crate::model::coverage::{CoverageReport, CoverageSummary};
use crate::model::outcome::{SuiteInfo, TestOutcome, TestStatus};
use crate::model::result::TestRunResult;
use crate::report::coverage::{ClassTable, build_class_table};
use crate::report::percent::{format_percent, percent};
use crate::report::progress::ProgressReporter;
use crate::report::sink::{Sink, Style};
use crate::report::summary::build_footer;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Lifecycle hooks invoked by a test driver, in order, for one run at a time.
pub trait RunListener {
    /// A new run begins; any state from a previous run is discarded.
    fn on_run_start(&mut self) -> Result<()>;

    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<()>;

    /// The running test was flagged before it ended.
    fn on_test_fault(&mut self, status: TestStatus) -> Result<()>;

    fn on_test_end(&mut self, outcome: &TestOutcome) -> Result<()>;

    /// `coverage` is `Some` only when coverage was collected for this run.
    fn on_run_end(
        &mut self,
        result: &TestRunResult,
        coverage: Option<&CoverageReport>,
    ) -> Result<()>;
}

/// Presentation knobs taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub verbose: bool,
    pub progress_glyph: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            progress_glyph: '.',
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            verbose: config.output.verbose,
            progress_glyph: config.progress_glyph(),
        }
    }
}

/// `"\n\nFinished in <s> seconds. Peak memory usage was <mb>Mb.\n"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_header(result: &TestRunResult) -> String {
    format!(
        "\n\nFinished in {:.3} seconds. Peak memory usage was {:.2}Mb.\n",
        result.elapsed.as_secs_f64(),
        result.peak_memory_bytes as f64 / BYTES_PER_MB,
    )
}

/// Overall coverage line plus the table of classes that are not fully covered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageBlock {
    pub summary: CoverageSummary,
    pub percent: f64,
    pub classes: ClassTable,
}

impl CoverageBlock {
    /// The overall figure comes from the report totals, never from the rows.
    pub fn build(report: &CoverageReport) -> Result<Self> {
        let summary = report.summary()?;
        let percent = percent(summary.executed_lines, summary.executable_lines);
        let classes = if percent >= 100.0 {
            ClassTable::default()
        } else {
            build_class_table(report)?
        };
        Ok(Self {
            summary,
            percent,
            classes,
        })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }

    /// `"Coverage: <pct>% (<executed>/<executable>)"`.
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "Coverage: {}% ({}/{})",
            format_percent(self.percent),
            self.summary.executed_lines,
            self.summary.executable_lines
        )
    }

    pub fn write_to(&self, sink: &mut impl Sink) -> Result<()> {
        if self.is_complete() {
            return sink.write_line_styled(Style::Neutral, &self.headline());
        }
        sink.write_line_styled(Style::Alarm, &self.headline())?;
        sink.write(&self.classes.render())
    }
}

/// Build and write the coverage block for `report`.
pub fn render_coverage(report: &CoverageReport, sink: &mut impl Sink) -> Result<CoverageBlock> {
    let block = CoverageBlock::build(report)?;
    block.write_to(sink)?;
    Ok(block)
}

/// Streams progress during a run and the summary at its end.
#[derive(Debug)]
pub struct ReportRenderer<S: Sink> {
    sink: S,
    options: RenderOptions,
    progress: ProgressReporter,
}

impl<S: Sink> ReportRenderer<S> {
    /// A renderer writing to `sink`, with fresh progress state.
    pub fn new(sink: S, options: RenderOptions) -> Self {
        Self {
            sink,
            options,
            progress: ProgressReporter::new(options.progress_glyph),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn progress(&self) -> &ProgressReporter {
        &self.progress
    }

    /// Header, footer, then the coverage block when a report is supplied.
    ///
    /// Depends only on its arguments, so rendering the same run twice gives
    /// identical output.
    pub fn render_summary(
        &mut self,
        result: &TestRunResult,
        coverage: Option<&CoverageReport>,
    ) -> Result<()> {
        self.sink.write(&render_header(result))?;

        let footer = build_footer(result);
        if self.options.verbose && footer.style != Style::Success {
            self.sink.write("\n")?;
        }
        self.sink.write_line_styled(footer.style, &footer.text)?;

        if let Some(report) = coverage {
            render_coverage(report, &mut self.sink)?;
        }
        Ok(())
    }
}

impl<S: Sink> RunListener for ReportRenderer<S> {
    fn on_run_start(&mut self) -> Result<()> {
        self.progress = ProgressReporter::new(self.options.progress_glyph);
        Ok(())
    }

    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<()> {
        self.progress.on_suite_start(suite);
        Ok(())
    }

    fn on_test_fault(&mut self, status: TestStatus) -> Result<()> {
        self.progress.on_test_fault(status, &mut self.sink)
    }

    fn on_test_end(&mut self, outcome: &TestOutcome) -> Result<()> {
        self.progress.on_test_end(outcome, &mut self.sink)
    }

    fn on_run_end(
        &mut self,
        result: &TestRunResult,
        coverage: Option<&CoverageReport>,
    ) -> Result<()> {
        self.render_summary(result, coverage)
    }
}
