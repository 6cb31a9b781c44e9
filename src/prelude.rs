//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use result_printer::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, RpError};

// Model
pub use crate::model::coverage::{
    ClassCoverage, CoverageNode, CoverageReport, CoverageSummary, DirectoryCoverage, FileCoverage,
    MethodCoverage,
};
pub use crate::model::outcome::{SuiteInfo, TestKind, TestOutcome, TestStatus};
pub use crate::model::result::{RunTally, TestRunResult};
pub use crate::model::transcript::{RunEvent, RunTranscript};

// Report
pub use crate::report::coverage::{ClassRow, ClassTable, build_class_table};
pub use crate::report::percent::percent;
pub use crate::report::renderer::{
    CoverageBlock, RenderOptions, ReportRenderer, RunListener, render_coverage,
};
pub use crate::report::replay::replay;
pub use crate::report::sink::{MemorySink, Sink, Style};
pub use crate::report::summary::{Footer, build_footer};
