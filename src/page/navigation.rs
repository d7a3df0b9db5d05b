// Active-link state for the bottom navigation

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
    /// `Some("page")` on the link for the current page
    pub aria_current: Option<&'static str>,
}

impl NavLink {
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            active: false,
            aria_current: None,
        }
    }
}

/// Last segment of `pathname`, or `default_page` when the path ends in `/`
pub fn current_page(pathname: &str, default_page: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => default_page.to_string(),
    }
}

/// Clear every link's active state, then mark the ones pointing at the
/// current page. Returns how many links were marked.
pub fn mark_active(links: &mut [NavLink], pathname: &str, default_page: &str) -> usize {
    let page = current_page(pathname, default_page);
    let mut marked = 0;

    for link in links.iter_mut() {
        link.active = false;
        link.aria_current = None;

        if link.href == page {
            link.active = true;
            link.aria_current = Some("page");
            marked += 1;
        }
    }

    tracing::debug!(page = %page, marked, "Navigation state updated");
    marked
}
