//! Harvest coordinator - per-journal and per-year orchestration
//!
//! For every selected journal:
//! 1. Fetch the landing page and build its year index
//! 2. For every selected year, fetch each listing page in index order and
//!    collect the year's entries
//! 3. Enrich the entries from their detail pages
//! 4. Hand the year's records to the output sink
//!
//! Listing pages are fetched one at a time. Detail pages are fetched with
//! bounded concurrency, and records keep the document order of their
//! entries. A failure on a landing or listing page abandons the current
//! journal only; the run moves on to the next one.

use crate::config::{HarvestConfig, JournalEntry, YearSelection};
use crate::harvest::detail::enrich;
use crate::harvest::fetcher::Fetcher;
use crate::harvest::index::{resolve_year_index, YearIndex};
use crate::harvest::sections::extract_sections;
use crate::harvest::{EntryStub, JournalSource, PaperRecord};
use crate::output::{HarvestStatistics, RecordSink};
use crate::HarvestError;
use futures::stream::{self, StreamExt};
use url::Url;

/// A journal together with the years to harvest from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalJob {
    pub source: JournalSource,
    pub years: YearSelection,
}

impl From<&JournalEntry> for JournalJob {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            source: entry.source(),
            years: entry.years.clone(),
        }
    }
}

/// A fetched landing page and the year index built from it
#[derive(Debug, Clone)]
pub struct LandingPage {
    /// Landing page URL, the base for its relative links
    pub url: Url,
    /// Raw markup, reused for years listed on the landing page itself
    pub body: String,
    /// Year to listing pages mapping
    pub index: YearIndex,
}

/// Runs the extraction pipeline over a `Fetcher`
pub struct Harvester<F> {
    fetcher: F,
    detail_concurrency: usize,
    archive_marker: String,
}

impl<F: Fetcher> Harvester<F> {
    /// Creates a harvester
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page markup
    /// * `config` - Harvest settings (concurrency, archive marker)
    pub fn new(fetcher: F, config: &HarvestConfig) -> Self {
        Self {
            fetcher,
            detail_concurrency: config.detail_concurrency.max(1) as usize,
            archive_marker: config.archive_marker.clone(),
        }
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches a journal's landing page and resolves its year index
    pub async fn resolve_index(&self, source: &JournalSource) -> Result<LandingPage, HarvestError> {
        let url = Url::parse(&source.landing_url)?;

        tracing::info!("Fetching available years for {}...", source.name);
        let body = self.fetcher.fetch(url.as_str()).await.into_body(url.as_str())?;

        let index = resolve_year_index(&body, &url, &self.archive_marker);
        tracing::debug!("{} offers {} years", source.name, index.len());

        Ok(LandingPage { url, body, index })
    }

    /// Collects the entries of one year across all of its listing pages
    ///
    /// Pages are visited in index order and their entries concatenated. A
    /// year missing from the index yields no entries.
    pub async fn collect_entries(
        &self,
        landing: &LandingPage,
        year: u32,
    ) -> Result<Vec<EntryStub>, HarvestError> {
        let Some(pages) = landing.index.pages(year) else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();

        for page in pages {
            let page_url = Url::parse(page)?;

            let found = if page_url == landing.url {
                extract_sections(&landing.body, year, &page_url)
            } else {
                tracing::debug!("Fetching listing page {}", page_url);
                let body = self
                    .fetcher
                    .fetch(page_url.as_str())
                    .await
                    .into_body(page_url.as_str())?;
                extract_sections(&body, year, &page_url)
            };

            tracing::debug!("{} entries for {} on {}", found.len(), year, page_url);
            entries.extend(found);
        }

        Ok(entries)
    }

    /// Enriches entries from their detail pages
    ///
    /// Up to `detail_concurrency` detail pages are in flight at once; the
    /// returned records are in the same order as `entries`.
    pub async fn enrich_entries(
        &self,
        journal: &str,
        year: u32,
        entries: Vec<EntryStub>,
    ) -> Vec<PaperRecord> {
        let fetcher = &self.fetcher;

        stream::iter(entries)
            .map(|entry| async move {
                tracing::trace!("Enriching '{}'", entry.title);
                let detail = enrich(fetcher, &entry.detail_url).await;
                PaperRecord::from_entry(journal, year, entry, detail)
            })
            .buffered(self.detail_concurrency)
            .collect()
            .await
    }

    /// Harvests all records of one journal year
    pub async fn harvest_year(
        &self,
        journal: &str,
        landing: &LandingPage,
        year: u32,
    ) -> Result<Vec<PaperRecord>, HarvestError> {
        let entries = self.collect_entries(landing, year).await?;
        Ok(self.enrich_entries(journal, year, entries).await)
    }

    /// Harvests the selected years of one journal into the sink
    ///
    /// Years missing from the index are skipped with a warning; the other
    /// years still run. Landing page, listing page and output failures
    /// abort the journal.
    pub async fn harvest_journal<S: RecordSink + ?Sized>(
        &self,
        job: &JournalJob,
        sink: &mut S,
        stats: &mut HarvestStatistics,
    ) -> Result<(), HarvestError> {
        let name = job.source.name.as_str();
        let landing = self.resolve_index(&job.source).await?;

        if landing.index.is_empty() {
            tracing::warn!("Could not find available years for {}.", name);
            return Ok(());
        }

        let available = landing.index.years_desc();
        tracing::info!("Available years for {}: {:?}", name, available);

        let years = match &job.years {
            YearSelection::All => available,
            YearSelection::Years(list) => list.clone(),
        };

        for year in years {
            if !landing.index.contains(year) {
                tracing::warn!("Year {} not available for {}. Skipping...", year, name);
                stats.record_skipped_year(name, year);
                continue;
            }

            tracing::info!("Scraping {} for year {}...", name, year);
            let records = self.harvest_year(name, &landing, year).await?;
            tracing::info!("Found {} papers in {} for {}.", records.len(), name, year);

            if records.is_empty() {
                tracing::info!("No papers found for {} {}.", name, year);
                stats.record_batch(name, year, &records, None);
                continue;
            }

            let path = sink.write_batch(name, year, &records)?;
            if let Some(path) = &path {
                tracing::info!("Data saved to {}", path.display());
            }
            stats.record_batch(name, year, &records, path);
        }

        Ok(())
    }

    /// Harvests every job in order
    ///
    /// A failing journal is logged and recorded in the statistics; the
    /// remaining journals are still attempted.
    pub async fn run<S: RecordSink + ?Sized>(
        &self,
        jobs: &[JournalJob],
        sink: &mut S,
    ) -> HarvestStatistics {
        let mut stats = HarvestStatistics::new();

        for job in jobs {
            stats.journals_attempted += 1;

            match self.harvest_journal(job, sink, &mut stats).await {
                Ok(()) => stats.journals_completed += 1,
                Err(e) => {
                    tracing::error!("Error processing {}: {}", job.source.name, e);
                    stats.record_failed_journal(&job.source.name, &e.to_string());
                }
            }
        }

        stats.finish();
        stats
    }
}
