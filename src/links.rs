use crate::dom::Dom;

/// Filename of the current page: the last path segment, or `home_page` for a bare directory.
pub fn current_page<'a>(pathname: &'a str, home_page: &'a str) -> &'a str {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => home_page,
    }
}

/// Point in-page anchors (`#section`) at the home page when the fragment is shown elsewhere.
///
/// Returns how many links were rewritten.
pub fn fix_links<D: Dom>(
    dom: &D,
    container_selector: &str,
    link_selector: &str,
    home_page: &str,
) -> usize {
    let Some(container) = dom.query(container_selector) else {
        return 0;
    };

    let pathname = dom.pathname();
    if current_page(&pathname, home_page) == home_page {
        return 0;
    }

    let mut rewritten = 0;
    for link in dom.query_all_within(&container, link_selector) {
        let Some(href) = dom.attribute(&link, "href") else {
            continue;
        };
        if href.starts_with('#') {
            dom.set_attribute(&link, "href", &format!("{home_page}{href}"));
            rewritten += 1;
        }
    }
    tracing::debug!(container = container_selector, rewritten, "fixed anchor links");
    rewritten
}
