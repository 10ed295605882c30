//! Fragment identifiers in link targets.

/// The fragment of an in-page link: `"#install"` gives `Some("install")`.
///
/// Returns `None` for hrefs that are not in-page links and for the bare `#`,
/// which names no element.
pub fn fragment_of(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}

/// Whether `href` points at the element with identifier `id`.
pub fn targets(href: &str, id: &str) -> bool {
    fragment_of(href) == Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_hash() {
        assert_eq!(fragment_of("#intro"), Some("intro"));
        assert_eq!(fragment_of("#a#b"), Some("a#b"));
    }

    #[test]
    fn bare_hash_has_no_fragment() {
        assert_eq!(fragment_of("#"), None);
    }

    #[test]
    fn non_fragment_hrefs() {
        assert_eq!(fragment_of("/docs/install"), None);
        assert_eq!(fragment_of("https://example.com/#intro"), None);
        assert_eq!(fragment_of(""), None);
    }

    #[test]
    fn targets_requires_exact_match() {
        assert!(targets("#install", "install"));
        assert!(!targets("#install", "install-linux"));
        assert!(!targets("#", ""));
    }
}
