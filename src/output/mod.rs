//! Output module for emitting listing records
//!
//! This module handles:
//! - The `OutputHandler` interface the run coordinator writes to
//! - Newline-delimited JSON output on any `io::Write`

mod jsonl;
mod traits;

pub use jsonl::JsonLinesOutput;
pub use traits::{OutputError, OutputHandler, OutputResult};
