use url::Url;

const PAGE_BASE: &str = "http://localhost/";

/// Fragment target of an in-page anchor (`#section`). Returns `None` for
/// anything that is not a same-page fragment link or has an empty fragment.
pub fn anchor_fragment(href: &str) -> Option<String> {
    let href = href.trim();
    if !href.starts_with('#') {
        return None;
    }
    let base = Url::parse(PAGE_BASE).ok()?;
    let resolved = base.join(href).ok()?;
    resolved
        .fragment()
        .filter(|fragment| !fragment.is_empty())
        .map(ToOwned::to_owned)
}

/// Scroll position that puts `target_top` just below a fixed header.
pub fn scroll_offset_for(target_top: f64, header_height: f64) -> f64 {
    target_top - header_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_links_resolve_to_their_id() {
        assert_eq!(anchor_fragment("#contact").as_deref(), Some("contact"));
        assert_eq!(anchor_fragment("  #about ").as_deref(), Some("about"));
    }

    #[test]
    fn non_fragment_links_are_ignored() {
        assert_eq!(anchor_fragment("#"), None);
        assert_eq!(anchor_fragment("/pricing#plans"), None);
        assert_eq!(anchor_fragment("https://example.com/#top"), None);
        assert_eq!(anchor_fragment(""), None);
    }

    #[test]
    fn offset_subtracts_header_height() {
        assert_eq!(scroll_offset_for(900.0, 70.0), 830.0);
        assert_eq!(scroll_offset_for(20.0, 70.0), -50.0);
    }
}
