//! Volume header and article entry extraction
//!
//! Inside a listing page every issue starts with a bold "volume header"
//! (`1998, Vol. 88, No. 3`) followed by a definition list of articles:
//!
//! ```text
//! <b>1998, Vol. 88, No. 3</b>
//! <dl>
//!   <dt><a href="v_88_y_1998_i_3_p_1-20.htm">Title</a></dt>
//!   <dd>Author One and Author Two</dd>
//!   ...
//! </dl>
//! ```
//!
//! Rows that do not follow this shape are skipped, never reported as errors.

use crate::harvest::dom::{
    element_text, emphasis_runs, enclosing, following_elements, is_named, next_element_sibling,
    select_all, select_first, select_within, EMPHASIS_SELECTOR,
};
use crate::harvest::EntryStub;
use crate::url::resolve_link;
use scraper::{ElementRef, Html};
use url::Url;

/// One volume header and the entries listed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    /// Year the header names
    pub year: u32,
    /// Trimmed header text
    pub header_text: String,
    /// Entries in document order
    pub entries: Vec<EntryStub>,
}

/// Returns true if a bold header introduces the given year's listing
///
/// The header must contain the year and look like volume metadata: it
/// mentions "vol" or "issue" (any case) or has more than one
/// comma-separated segment.
///
/// # Examples
///
/// ```
/// use journal_harvest::harvest::is_volume_header;
///
/// assert!(is_volume_header("1998, Vol. 88, No. 3", 1998));
/// assert!(is_volume_header("Volume 113, Issue 1 2023", 2023));
/// assert!(!is_volume_header("Published 1998", 1998));
/// assert!(!is_volume_header("1998, Vol. 88, No. 3", 1999));
/// ```
pub fn is_volume_header(text: &str, year: u32) -> bool {
    if !text.contains(&year.to_string()) {
        return false;
    }

    let lower = text.to_lowercase();
    lower.contains("vol") || lower.contains("issue") || text.split(',').count() > 1
}

/// Extracts every section of the given year from a listing page
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `year` - The year being harvested
/// * `page_url` - URL of the page, used to resolve article links
pub fn extract_section_blocks(html: &str, year: u32, page_url: &Url) -> Vec<SectionBlock> {
    let document = Html::parse_document(html);

    emphasis_runs(&document)
        .into_iter()
        .filter_map(|header| {
            let header_text = element_text(header);
            if !is_volume_header(&header_text, year) {
                return None;
            }

            let Some(list) = entry_list(header) else {
                tracing::debug!("Header '{}' has no entry list", header_text);
                return None;
            };

            Some(SectionBlock {
                year,
                header_text,
                entries: extract_entries(list, page_url),
            })
        })
        .collect()
}

/// Extracts the entries of the given year from a listing page
///
/// Headers come in document order and so do the entries under each header.
///
/// # Example
///
/// ```
/// use journal_harvest::harvest::extract_sections;
/// use url::Url;
///
/// let html = r#"<b>1998, Vol. 88, No. 3</b>
///   <dl><dt><a href="p1.htm">First</a></dt><dd>A. Author</dd></dl>"#;
/// let base = Url::parse("https://example.com/journal/default1.htm").unwrap();
/// let entries = extract_sections(html, 1998, &base);
/// assert_eq!(entries[0].detail_url, "https://example.com/journal/p1.htm");
/// ```
pub fn extract_sections(html: &str, year: u32, page_url: &Url) -> Vec<EntryStub> {
    extract_section_blocks(html, year, page_url)
        .into_iter()
        .flat_map(|block| block.entries)
        .collect()
}

/// Outcome of scanning the siblings after a header
enum ListSearch<'a> {
    Found(ElementRef<'a>),
    /// Another volume header came first; the list belongs to it
    Blocked,
    Exhausted,
}

/// The definition list belonging to a header
///
/// Falls back to the header's enclosing paragraph: the HTML parser closes
/// an open `<p>` when a `<dl>` starts, which moves the list out of the
/// header's sibling chain. Neither walk crosses another volume header, so
/// a header without a list of its own yields nothing.
fn entry_list(header: ElementRef<'_>) -> Option<ElementRef<'_>> {
    match search_list(header) {
        ListSearch::Found(list) => Some(list),
        ListSearch::Blocked => None,
        ListSearch::Exhausted => match search_list(enclosing(header, "p")?) {
            ListSearch::Found(list) => Some(list),
            ListSearch::Blocked | ListSearch::Exhausted => None,
        },
    }
}

fn search_list(start: ElementRef<'_>) -> ListSearch<'_> {
    for sibling in following_elements(start) {
        if is_named(sibling, "dl") {
            return ListSearch::Found(sibling);
        }
        if holds_volume_header(sibling) {
            return ListSearch::Blocked;
        }
    }
    ListSearch::Exhausted
}

/// Returns true if the element is, or contains, a volume header of any year
fn holds_volume_header(element: ElementRef<'_>) -> bool {
    if is_named(element, "b") || is_named(element, "strong") {
        return looks_like_volume_header(&element_text(element));
    }
    select_within(element, EMPHASIS_SELECTOR)
        .into_iter()
        .any(|run| looks_like_volume_header(&element_text(run)))
}

/// `is_volume_header` for whichever four-digit number the text carries
fn looks_like_volume_header(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| run.len() == 4)
        .filter_map(|run| run.parse::<u32>().ok())
        .any(|year| is_volume_header(text, year))
}

/// Resolves every well-formed `dt`/`dd` pair in a definition list
fn extract_entries(list: ElementRef<'_>, page_url: &Url) -> Vec<EntryStub> {
    select_within(list, "dt")
        .into_iter()
        .filter_map(|term| resolve_entry(term, page_url))
        .collect()
}

/// Turns one definition term into an entry
///
/// Requires a link with a resolvable target and non-empty text, and a
/// `dd` directly after the term. Anything else is a non-entry.
fn resolve_entry(term: ElementRef<'_>, page_url: &Url) -> Option<EntryStub> {
    let link = select_first(term, "a")?;

    let title = element_text(link);
    if title.is_empty() {
        return None;
    }

    let href = link.value().attr("href")?;
    let detail_url = resolve_link(href, page_url)?;

    let description = next_element_sibling(term).filter(|el| is_named(*el, "dd"));
    let Some(description) = description else {
        tracing::debug!("Entry '{}' has no author block, skipping", title);
        return None;
    };

    Some(EntryStub {
        title,
        detail_url,
        authors_raw: element_text(description),
    })
}

/// Counts definition terms containing a link, across the whole page
///
/// Upper bound on the number of entries any year can yield from a page.
pub fn count_linked_terms(html: &str) -> usize {
    let document = Html::parse_document(html);
    select_all(&document, "dt")
        .into_iter()
        .filter(|term| select_first(*term, "a").is_some())
        .count()
}
