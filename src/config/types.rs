use crate::config::catalog::default_journals;
use crate::config::selection::YearSelection;
use crate::harvest::JournalSource;
use serde::Deserialize;

/// Main configuration structure for Journal-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(rename = "journal", default)]
    pub journals: Vec<JournalEntry>,
}

impl Config {
    /// Returns the journal catalog: the configured journals, or the
    /// built-in catalog when none are configured
    pub fn catalog(&self) -> Vec<JournalEntry> {
        if self.journals.is_empty() {
            default_journals()
        } else {
            self.journals.clone()
        }
    }
}

/// Harvest behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Directory receiving one CSV file per journal and year
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Maximum number of detail pages fetched concurrently
    #[serde(rename = "detail-concurrency")]
    pub detail_concurrency: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Substring of an anchor target that marks a paged archive link
    #[serde(rename = "archive-marker")]
    pub archive_marker: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            output_dir: "data".to_string(),
            detail_concurrency: 4,
            request_timeout_secs: 30,
            archive_marker: "default".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the harvester
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for harvester-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "JournalHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version`, followed by ` (+ContactURL; ContactEmail)` when any
    /// contact detail is configured.
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        let contact: Vec<String> = [
            self.contact_url.as_ref().map(|u| format!("+{}", u)),
            self.contact_email.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if contact.is_empty() {
            base
        } else {
            format!("{} ({})", base, contact.join("; "))
        }
    }
}

/// A journal to harvest, with the years selected for it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JournalEntry {
    /// Display name, also used for output file names
    pub name: String,

    /// Landing page of the journal's article index
    pub url: String,

    /// Years to harvest (defaults to every year the index offers)
    #[serde(default)]
    pub years: YearSelection,
}

impl JournalEntry {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            years: YearSelection::All,
        }
    }

    /// The static journal description handed to the harvester
    pub fn source(&self) -> JournalSource {
        JournalSource {
            name: self.name.clone(),
            landing_url: self.url.clone(),
        }
    }
}
