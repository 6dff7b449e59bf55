//! Output sink traits and error types
//!
//! This module defines the trait interface for record sinks, which persist
//! the records of one journal year as a unit.

use crate::harvest::PaperRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record sinks
///
/// A sink receives every record of one (journal, year) pair at once, in
/// document order, and decides where and how they are stored.
pub trait RecordSink {
    /// Persists one journal year
    ///
    /// # Arguments
    ///
    /// * `journal` - Journal display name
    /// * `year` - Publication year
    /// * `records` - The year's records in document order
    ///
    /// # Returns
    ///
    /// The file written, if the sink writes files
    fn write_batch(
        &mut self,
        journal: &str,
        year: u32,
        records: &[PaperRecord],
    ) -> OutputResult<Option<PathBuf>>;
}
