//! Configuration module for Journal-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, the built-in journal catalog, and journal/year selection.
//!
//! # Example
//!
//! ```no_run
//! use journal_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Detail fetch concurrency: {}", config.harvest.detail_concurrency);
//! ```

mod catalog;
mod parser;
mod selection;
mod types;
mod validation;

// Re-export types
pub use catalog::default_journals;
pub use selection::{parse_year_selection, select_journals, YearSelection};
pub use types::{Config, HarvestConfig, JournalEntry, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
