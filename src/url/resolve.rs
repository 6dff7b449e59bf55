use url::Url;

/// Resolves a link href to an absolute URL
///
/// Returns None if the link cannot point at another document:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that fail to join with the base
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use journal_harvest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://econpapers.repec.org/article/aeaaecrev/").unwrap();
/// assert_eq!(
///     resolve_link("default1.htm", &base).as_deref(),
///     Some("https://econpapers.repec.org/article/aeaaecrev/default1.htm")
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Returns true if an anchor target points at a paged archive listing
///
/// Archive pages carry a fixed marker in their file name (`default1.htm`,
/// `default2.htm`, ...).
pub fn is_archive_link(href: &str, marker: &str) -> bool {
    !marker.is_empty() && href.contains(marker)
}
