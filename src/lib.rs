//! Journal-Harvest: bibliographic records from journal article indexes
//!
//! This crate walks a journal's article index (a loosely structured HTML
//! listing grouped by publication year), collects every article entry for
//! the selected years, follows each entry to its detail page for the
//! abstract and outbound publisher link, and writes one CSV file per
//! journal and year.

pub mod config;
pub mod harvest;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Journal-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP {status_code} while fetching {url}")]
    Fetch { url: String, status_code: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown journal selector: {0}")]
    UnknownJournal(String),

    #[error("Invalid year selection: {0}")]
    InvalidYears(String),
}

/// Result type alias for Journal-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, JournalEntry, YearSelection};
pub use harvest::{EntryStub, Harvester, JournalSource, PaperRecord, YearIndex};
