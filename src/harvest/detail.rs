//! Article detail page enrichment
//!
//! A detail page shows labelled fields as `<b>Label:</b> value`. Two of
//! them are read:
//! - `Abstract:`, whose value is the node right after the label
//! - `Downloads:`, followed by an optional annotation and then the
//!   publisher link, whose visible text is the outbound URL
//!
//! Enrichment never fails: a missing label, an unreachable page or an
//! error status all produce empty fields.

use crate::harvest::dom::{element_text, find_label, following_elements, is_named, next_node_text};
use crate::harvest::fetcher::{FetchResult, Fetcher};
use scraper::Html;

const ABSTRACT_LABEL: &str = "Abstract:";
const DOWNLOADS_LABEL: &str = "Downloads:";

/// Fields read from an article's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailInfo {
    /// Free-text abstract, empty if absent
    pub abstract_text: String,
    /// Outbound publisher URL, empty if absent
    pub outbound_url: String,
}

impl DetailInfo {
    /// Returns true if neither field was found
    pub fn is_empty(&self) -> bool {
        self.abstract_text.is_empty() && self.outbound_url.is_empty()
    }
}

/// Fetches a detail page and extracts its abstract and outbound link
///
/// Fetch failures are logged and yield an empty `DetailInfo`.
pub async fn enrich<F: Fetcher>(fetcher: &F, detail_url: &str) -> DetailInfo {
    match fetcher.fetch(detail_url).await {
        FetchResult::Success { body, .. } => parse_detail(&body),
        FetchResult::HttpError { status_code } => {
            tracing::warn!("Error fetching data from {}: HTTP {}", detail_url, status_code);
            DetailInfo::default()
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Error fetching data from {}: {}", detail_url, error);
            DetailInfo::default()
        }
    }
}

/// Extracts the abstract and outbound link from detail page markup
///
/// # Example
///
/// ```
/// use journal_harvest::harvest::parse_detail;
///
/// let html = r#"<p><b>Abstract:</b> We study trade.<br>
///   <b>Downloads:</b> (external link)<br>
///   <a href="https://doi.org/10.1/x">https://doi.org/10.1/x</a></p>"#;
/// let info = parse_detail(html);
/// assert_eq!(info.abstract_text, "We study trade.");
/// assert_eq!(info.outbound_url, "https://doi.org/10.1/x");
/// ```
pub fn parse_detail(html: &str) -> DetailInfo {
    let document = Html::parse_document(html);

    DetailInfo {
        abstract_text: extract_abstract(&document),
        outbound_url: extract_outbound_url(&document),
    }
}

fn extract_abstract(document: &Html) -> String {
    find_label(document, ABSTRACT_LABEL)
        .and_then(next_node_text)
        .unwrap_or_default()
}

/// Walks the siblings after the downloads label
///
/// The first link wins; a paragraph boundary before any link means there
/// is no outbound URL.
fn extract_outbound_url(document: &Html) -> String {
    let Some(label) = find_label(document, DOWNLOADS_LABEL) else {
        return String::new();
    };

    for sibling in following_elements(label) {
        if is_named(sibling, "a") {
            return element_text(sibling);
        }
        if is_named(sibling, "p") {
            break;
        }
    }

    String::new()
}
