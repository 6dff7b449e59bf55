//! CSV record sink
//!
//! Writes one file per journal year, named `<Journal_Name>_<year>.csv`,
//! with the columns `journal,year,title,authors,abstract,url`.

use crate::harvest::PaperRecord;
use crate::output::traits::{OutputError, OutputResult, RecordSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Record sink writing CSV files into a directory
#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing into `output_dir`
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the file for a journal year
    pub fn path_for(&self, journal: &str, year: u32) -> PathBuf {
        self.output_dir.join(file_name_for(journal, year))
    }
}

impl RecordSink for CsvSink {
    fn write_batch(
        &mut self,
        journal: &str,
        year: u32,
        records: &[PaperRecord],
    ) -> OutputResult<Option<PathBuf>> {
        if records.is_empty() {
            return Ok(None);
        }

        fs::create_dir_all(&self.output_dir)?;

        let path = self.path_for(journal, year);
        write_records(&path, records)?;

        Ok(Some(path))
    }
}

/// File name for a journal year
///
/// # Examples
///
/// ```
/// use journal_harvest::output::file_name_for;
///
/// assert_eq!(file_name_for("AEJ: Applied Economics", 2023), "AEJ_Applied_Economics_2023.csv");
/// ```
pub fn file_name_for(journal: &str, year: u32) -> String {
    format!("{}_{}.csv", sanitize_journal_name(journal), year)
}

/// Turns a journal name into a file stem
///
/// Keeps letters, digits, underscores, hyphens and whitespace, trims the
/// result, and replaces each space with an underscore.
pub fn sanitize_journal_name(journal: &str) -> String {
    journal
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Writes records to a CSV file with a header row
pub fn write_records(path: &Path, records: &[PaperRecord]) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer
        .flush()
        .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

/// Reads records back from a CSV file written by `write_records`
pub fn read_records(path: &Path) -> OutputResult<Vec<PaperRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let records = reader
        .deserialize()
        .collect::<Result<Vec<PaperRecord>, csv::Error>>()?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(title: &str, abstract_text: &str, url: &str) -> PaperRecord {
        PaperRecord {
            journal: "American Economic Review".to_string(),
            year: 1998,
            title: title.to_string(),
            authors: "Jane Doe and John Roe".to_string(),
            abstract_text: abstract_text.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_sanitize_journal_name() {
        assert_eq!(
            sanitize_journal_name("American Economic Review"),
            "American_Economic_Review"
        );
        assert_eq!(sanitize_journal_name("AEJ: Economic Policy"), "AEJ_Economic_Policy");
        assert_eq!(
            sanitize_journal_name("  The Review of Economics and Statistics "),
            "The_Review_of_Economics_and_Statistics"
        );
        assert_eq!(sanitize_journal_name("Econ/Stats & Co."), "EconStats__Co");
    }

    #[test]
    fn test_path_for() {
        let sink = CsvSink::new("data");
        assert_eq!(
            sink.path_for("Journal of Econometrics", 2021),
            PathBuf::from("data/Journal_of_Econometrics_2021.csv")
        );
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::new(dir.path().join("nested"));

        let records = vec![
            record(
                "Trade, Growth, and \"Quotes\"",
                "Line one.\nLine two, with a comma.",
                "https://doi.org/10.1/x",
            ),
            record("No Abstract", "", ""),
        ];

        let path = sink
            .write_batch("American Economic Review", 1998, &records)
            .unwrap()
            .unwrap();
        assert!(path.ends_with("American_Economic_Review_1998.csv"));

        let read_back = read_records(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_header_column_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_records(&path, &[record("T", "A", "U")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "journal,year,title,authors,abstract,url");
    }

    #[test]
    fn test_empty_batch_not_written() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::new(dir.path());

        let written = sink.write_batch("Econometrica", 2020, &[]).unwrap();
        assert!(written.is_none());
        assert!(!sink.path_for("Econometrica", 2020).exists());
    }
}
