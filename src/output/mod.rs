//! Output module for persisting harvested records
//!
//! This module handles:
//! - The record sink interface the harvester writes through
//! - CSV files, one per journal and year
//! - Recording and printing run statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{
    file_name_for, read_records, sanitize_journal_name, write_records, CsvSink,
};
pub use stats::{print_statistics, HarvestStatistics, YearSummary};
pub use traits::{OutputError, OutputResult, RecordSink};
