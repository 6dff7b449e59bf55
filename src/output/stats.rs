//! Run statistics
//!
//! Collected while harvesting and printed once the run is over.

use crate::harvest::PaperRecord;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Outcome of one harvested journal year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSummary {
    pub journal: String,
    pub year: u32,
    pub records: u64,
    pub file: Option<PathBuf>,
}

/// Harvest run statistics
#[derive(Debug, Clone)]
pub struct HarvestStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of journals attempted
    pub journals_attempted: u64,

    /// Number of journals that ran to completion
    pub journals_completed: u64,

    /// Journals abandoned, with the reason
    pub failed_journals: Vec<(String, String)>,

    /// Harvested journal years in processing order
    pub years: Vec<YearSummary>,

    /// Requested years that the journal's index did not offer
    pub skipped_years: Vec<(String, u32)>,

    /// Total records handed to the sink
    pub records_written: u64,

    /// Records whose abstract came back empty
    pub records_missing_abstract: u64,

    /// Records whose outbound URL came back empty
    pub records_missing_url: u64,
}

impl Default for HarvestStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl HarvestStatistics {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            journals_attempted: 0,
            journals_completed: 0,
            failed_journals: Vec::new(),
            years: Vec::new(),
            skipped_years: Vec::new(),
            records_written: 0,
            records_missing_abstract: 0,
            records_missing_url: 0,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Records a harvested journal year
    pub fn record_batch(
        &mut self,
        journal: &str,
        year: u32,
        records: &[PaperRecord],
        file: Option<PathBuf>,
    ) {
        let count = records.len() as u64;
        if file.is_some() {
            self.records_written += count;
        }
        self.records_missing_abstract += records
            .iter()
            .filter(|r| r.abstract_text.is_empty())
            .count() as u64;
        self.records_missing_url += records.iter().filter(|r| r.url.is_empty()).count() as u64;

        self.years.push(YearSummary {
            journal: journal.to_string(),
            year,
            records: count,
            file,
        });
    }

    /// Records a requested year missing from the index
    pub fn record_skipped_year(&mut self, journal: &str, year: u32) {
        self.skipped_years.push((journal.to_string(), year));
    }

    /// Records a journal abandoned after an error
    pub fn record_failed_journal(&mut self, journal: &str, reason: &str) {
        self.failed_journals
            .push((journal.to_string(), reason.to_string()));
    }

    /// Total records harvested, whether or not a file was written
    pub fn total_records(&self) -> u64 {
        self.years.iter().map(|y| y.records).sum()
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of records with an abstract, as a percentage
    pub fn abstract_coverage(&self) -> f64 {
        let total = self.total_records();
        if total == 0 {
            return 0.0;
        }
        ((total - self.records_missing_abstract) as f64 / total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {}s", duration);
    }
    println!();

    println!("Journals:");
    println!("  Attempted: {}", stats.journals_attempted);
    println!("  Completed: {}", stats.journals_completed);
    println!();

    if !stats.years.is_empty() {
        println!("Years ({}):", stats.years.len());
        for summary in &stats.years {
            match &summary.file {
                Some(file) => println!(
                    "  {} {}: {} records -> {}",
                    summary.journal,
                    summary.year,
                    summary.records,
                    file.display()
                ),
                None => println!(
                    "  {} {}: {} records",
                    summary.journal, summary.year, summary.records
                ),
            }
        }
        println!();
    }

    if !stats.skipped_years.is_empty() {
        println!("Skipped Years ({}):", stats.skipped_years.len());
        for (journal, year) in &stats.skipped_years {
            println!("  - {} {} (not in index)", journal, year);
        }
        println!();
    }

    if !stats.failed_journals.is_empty() {
        println!("Failed Journals ({}):", stats.failed_journals.len());
        for (journal, reason) in &stats.failed_journals {
            println!("  - {}: {}", journal, reason);
        }
        println!();
    }

    println!("Records written: {}", stats.records_written);
    println!(
        "Abstract coverage: {:.1}% ({} missing abstract, {} missing URL)",
        stats.abstract_coverage(),
        stats.records_missing_abstract,
        stats.records_missing_url
    );
}
