//! Sibling navigation over a parsed document
//!
//! Index and detail pages carry no semantic markup for the fields we want;
//! everything is found by position relative to a label or header element.
//! These helpers wrap `scraper`'s tree so the extractors can ask for "the
//! node right after this one" or "the next `dl` after this header".

use scraper::{ElementRef, Html, Selector};

/// Element names that make up a bold/emphasis text run
pub const EMPHASIS_SELECTOR: &str = "b, strong";

/// Returns every bold/emphasis element in document order
pub fn emphasis_runs(document: &Html) -> Vec<ElementRef<'_>> {
    select_all(document, EMPHASIS_SELECTOR)
}

/// Selects all elements matching a CSS selector, in document order
///
/// An unparsable selector yields no elements.
pub fn select_all<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Selects all descendants of `element` matching a CSS selector
pub fn select_within<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Selects the first descendant of `element` matching a CSS selector
pub fn select_first<'a>(element: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    element.select(&selector).next()
}

/// Concatenated descendant text of an element, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The text node immediately following `element`, untrimmed
///
/// Returns None when the next sibling is an element, a comment, or absent.
pub fn next_text_sibling<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let sibling = element.next_sibling()?;
    sibling.value().as_text().map(|text| &**text)
}

/// Trimmed text of whatever node immediately follows `element`
///
/// A text node yields its own content, an element yields its descendant
/// text. Comments and a missing sibling yield None.
pub fn next_node_text(element: ElementRef<'_>) -> Option<String> {
    let sibling = element.next_sibling()?;

    if let Some(text) = sibling.value().as_text() {
        return Some(text.trim().to_string());
    }

    ElementRef::wrap(sibling).map(element_text)
}

/// Following sibling elements of `element`, skipping text and comments
pub fn following_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// The first element after `element` (ignoring text and comments)
pub fn next_element_sibling<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    following_elements(element).next()
}

/// Returns true if the element has the given tag name
pub fn is_named(element: ElementRef<'_>, name: &str) -> bool {
    element.value().name() == name
}

/// The nearest ancestor element with the given tag name
pub fn enclosing<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == name)
}

/// The first bold/emphasis element whose trimmed text equals `label`
pub fn find_label<'a>(document: &'a Html, label: &str) -> Option<ElementRef<'a>> {
    emphasis_runs(document)
        .into_iter()
        .find(|run| element_text(*run) == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_emphasis_runs_in_document_order() {
        let doc = parse("<b>one</b><p><strong>two</strong></p><b>three</b>");
        let texts: Vec<String> = emphasis_runs(&doc).into_iter().map(element_text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_next_text_sibling() {
        let doc = parse(r#"<a href="x">archive</a> (1998)<br>"#);
        let anchor = select_all(&doc, "a")[0];
        assert_eq!(next_text_sibling(anchor), Some(" (1998)"));
    }

    #[test]
    fn test_next_text_sibling_is_element() {
        let doc = parse(r#"<a href="x">archive</a><i>(1998)</i>"#);
        let anchor = select_all(&doc, "a")[0];
        assert_eq!(next_text_sibling(anchor), None);
    }

    #[test]
    fn test_next_node_text() {
        let doc = parse("<b>Abstract:</b>  Some words. <br>");
        let label = find_label(&doc, "Abstract:").unwrap();
        assert_eq!(next_node_text(label).as_deref(), Some("Some words."));

        let doc = parse("<b>Abstract:</b><span> Inside span </span>");
        let label = find_label(&doc, "Abstract:").unwrap();
        assert_eq!(next_node_text(label).as_deref(), Some("Inside span"));
    }

    #[test]
    fn test_following_elements_skip_text() {
        let doc = parse("<b>Header</b> text <br><i>note</i><dl><dt>x</dt></dl>");
        let header = emphasis_runs(&doc)[0];
        let names: Vec<&str> = following_elements(header).map(|e| e.value().name()).collect();
        assert_eq!(names, vec!["br", "i", "dl"]);
        assert_eq!(next_element_sibling(header).map(|e| e.value().name()), Some("br"));
    }

    #[test]
    fn test_enclosing() {
        let doc = parse("<p>text <b>bold</b></p>");
        let bold = emphasis_runs(&doc)[0];
        assert!(enclosing(bold, "p").is_some());
        assert!(enclosing(bold, "dl").is_none());
    }

    #[test]
    fn test_find_label_exact_match() {
        let doc = parse("<b>Abstract: none</b><b> Abstract: </b>");
        let label = find_label(&doc, "Abstract:").unwrap();
        assert_eq!(label.text().collect::<String>(), " Abstract: ");
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = parse("<b>x</b>");
        assert!(select_all(&doc, "b[[").is_empty());
    }
}
