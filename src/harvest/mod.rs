//! Harvest module: the extraction pipeline
//!
//! This module contains the core harvesting logic, including:
//! - Fetching pages over HTTP
//! - Resolving which pages list which publication year
//! - Extracting volume sections and article entries from listing pages
//! - Enriching entries with the abstract and outbound link of their
//!   detail page
//! - Coordinating all of the above per journal and year

mod coordinator;
mod detail;
pub mod dom;
mod fetcher;
mod index;
mod sections;

pub use coordinator::{Harvester, JournalJob, LandingPage};
pub use detail::{enrich, parse_detail, DetailInfo};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use index::{resolve_year_index, YearIndex};
pub use sections::{
    count_linked_terms, extract_section_blocks, extract_sections, is_volume_header, SectionBlock,
};

use serde::{Deserialize, Serialize};

/// A journal as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSource {
    /// Display name
    pub name: String,
    /// Landing page of the journal's article index
    pub landing_url: String,
}

/// One article entry of a listing page, pending enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStub {
    /// Visible text of the entry's link
    pub title: String,
    /// Absolute URL of the article's detail page
    pub detail_url: String,
    /// Author line as printed under the title
    pub authors_raw: String,
}

/// Final bibliographic record for one article
///
/// Field order is the column order of the CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub journal: String,
    pub year: u32,
    pub title: String,
    pub authors: String,
    /// Empty when the detail page had no abstract or could not be fetched
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Outbound publisher URL, empty when not found
    pub url: String,
}

impl PaperRecord {
    /// Combines an entry with the fields read from its detail page
    pub fn from_entry(journal: &str, year: u32, entry: EntryStub, detail: DetailInfo) -> Self {
        Self {
            journal: journal.to_string(),
            year,
            title: entry.title,
            authors: entry.authors_raw,
            abstract_text: detail.abstract_text,
            url: detail.outbound_url,
        }
    }
}
