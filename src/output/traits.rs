//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! errors they report.

use crate::crawler::ListingRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// An output handler receives every record of a run exactly once, in
/// discovery order.
pub trait OutputHandler {
    /// Writes one record
    ///
    /// # Arguments
    ///
    /// * `record` - The listing record to write
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()>;

    /// Finalizes the output after the last record
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Collects records in memory
impl OutputHandler for Vec<ListingRecord> {
    fn emit(&mut self, record: &ListingRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}
