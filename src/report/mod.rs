//! Result reporting: live progress, the summary footer, and the per-class
//! coverage breakdown.

pub mod coverage;
pub mod percent;
pub mod progress;
pub mod renderer;
pub mod replay;
pub mod sink;
pub mod summary;
