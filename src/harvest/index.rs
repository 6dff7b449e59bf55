//! Year index resolution
//!
//! A journal's landing page lays out its years in two incompatible ways:
//! - historical years live on separately paginated archive pages, linked as
//!   `<a href="default3.htm">...</a> (1998)`
//! - recent years are listed on the landing page itself, each under a bold
//!   header ending in the year (`Volume 113, Issue 1, 2023`)
//!
//! Both layouts are detected independently and merged into one `YearIndex`.

use crate::harvest::dom::{element_text, emphasis_runs, next_text_sibling, select_all};
use crate::url::{is_archive_link, resolve_link};
use scraper::Html;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// Mapping from publication year to the pages listing that year
///
/// Page URLs within a year are distinct and kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearIndex {
    pages: BTreeMap<u32, Vec<String>>,
}

impl YearIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page for a year unless that exact URL is already listed
    ///
    /// Returns true if the URL was added.
    pub fn add_page(&mut self, year: u32, url: String) -> bool {
        let pages = self.pages.entry(year).or_default();
        if pages.contains(&url) {
            false
        } else {
            pages.push(url);
            true
        }
    }

    /// Pages listing the given year, or None if the year is not offered
    pub fn pages(&self, year: u32) -> Option<&[String]> {
        self.pages.get(&year).map(Vec::as_slice)
    }

    /// Returns true if the index offers the given year
    pub fn contains(&self, year: u32) -> bool {
        self.pages.contains_key(&year)
    }

    /// All offered years, most recent first
    pub fn years_desc(&self) -> Vec<u32> {
        self.pages.keys().rev().copied().collect()
    }

    /// Number of offered years
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no year was found
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Builds the year index of a journal landing page
///
/// # Arguments
///
/// * `html` - The landing page markup
/// * `base_url` - The landing page URL
/// * `archive_marker` - Substring identifying archive page links
///
/// # Example
///
/// ```
/// use journal_harvest::harvest::resolve_year_index;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/journal/").unwrap();
/// let html = r#"<a href="default1.htm">archive</a> (1998)"#;
/// let index = resolve_year_index(html, &base, "default");
/// assert_eq!(
///     index.pages(1998).unwrap(),
///     &["https://example.com/journal/default1.htm".to_string()]
/// );
/// ```
pub fn resolve_year_index(html: &str, base_url: &Url, archive_marker: &str) -> YearIndex {
    let document = Html::parse_document(html);

    let mut index = archive_years(&document, base_url, archive_marker);

    for year in listed_years(&document) {
        if !index.contains(year) {
            index.add_page(year, base_url.to_string());
        }
    }

    index
}

/// Years reachable through archive links
///
/// An archive anchor counts when the text right after it, stripped of
/// whitespace and parentheses, is a number.
fn archive_years(document: &Html, base_url: &Url, archive_marker: &str) -> YearIndex {
    let mut index = YearIndex::new();

    for anchor in select_all(document, "a[href]") {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_archive_link(href, archive_marker) {
            continue;
        }

        let Some(year) = next_text_sibling(anchor).and_then(parse_parenthesized_year) else {
            continue;
        };

        let Some(page_url) = resolve_link(href, base_url) else {
            tracing::debug!("Skipping unresolvable archive link {}", href);
            continue;
        };

        if index.add_page(year, page_url) {
            tracing::trace!("Archive page for {}: {}", year, href);
        }
    }

    index
}

/// Years named by comma-separated bold headers on the page itself
fn listed_years(document: &Html) -> BTreeSet<u32> {
    emphasis_runs(document)
        .into_iter()
        .filter_map(|run| trailing_year(&element_text(run)))
        .collect()
}

/// Parses `" (1998) "` or `"1998"` into a year
fn parse_parenthesized_year(text: &str) -> Option<u32> {
    let trimmed = text
        .trim()
        .trim_matches(|c| c == '(' || c == ')')
        .trim();
    parse_digits(trimmed)
}

/// The last comma-separated segment of a header, if it is a number
///
/// Headers without a comma never name a year this way.
fn trailing_year(text: &str) -> Option<u32> {
    let mut segments = text.split(',');
    segments.next()?;
    let last = segments.last()?;
    parse_digits(last.trim())
}

/// Parses a non-empty all-ASCII-digit string
fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
