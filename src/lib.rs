#![forbid(unsafe_code)]

//! Result printer — turns a test driver's lifecycle events into console output.
//!
//! Three parts:
//! 1. **Progress** — one glyph per finished test, plus passthrough of captured output
//! 2. **Summary** — elapsed time, peak memory, and a pass/fail/skip footer line
//! 3. **Coverage** — overall percentage and an aligned table of classes that
//!    are not fully covered, sorted by qualified name
//!
//! # Library usage
//!
//! ```rust,no_run
//! use result_printer::prelude::*;
//!
//! let mut renderer = ReportRenderer::new(MemorySink::new(), RenderOptions::default());
//! renderer.on_run_start()?;
//! renderer.on_test_end(&TestOutcome::case("testSum", TestStatus::Passed, 3))?;
//! renderer.on_run_end(&TestRunResult::default(), None)?;
//! print!("{}", renderer.sink().text());
//! # Ok::<(), RpError>(())
//! ```

pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod logger;
pub mod model;
pub mod report;
