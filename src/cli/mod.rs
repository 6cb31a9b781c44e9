//! Terminal-facing pieces used by the `rprint` binary.

pub mod console;
