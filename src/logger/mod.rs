//! Append-only JSONL activity logging.

pub mod jsonl;
pub mod listener;
