// Smooth scrolling for in-page anchor links

use serde::Serialize;

/// Read-only view of the rendered page
#[cfg_attr(test, mockall::automock)]
pub trait PageLayout {
    /// Distance from the viewport top to the element with `id`, if it exists
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Current vertical scroll offset
    fn page_y_offset(&self) -> f64;

    /// Whether the user asked the platform to reduce motion
    fn prefers_reduced_motion(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn for_motion_preference(reduced_motion: bool) -> Self {
        if reduced_motion {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        }
    }
}

/// What the page should do for one anchor click
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollPlan {
    /// Absolute document offset to scroll to
    pub top: f64,
    pub behavior: ScrollBehavior,
    /// Element id to focus without scrolling
    pub focus_target: String,
    /// Fragment to push onto history, e.g. `#subscribe`
    pub history_fragment: String,
}

/// Plan the scroll for a click on a link with `href`.
///
/// Returns `None` when the browser's default should run instead: the href is
/// not an in-page anchor, is the bare `#`, or names a missing element.
pub fn plan_anchor_scroll(href: &str, layout: &dyn PageLayout, nav_height: f64) -> Option<ScrollPlan> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }

    let element_top = layout.element_top(id)?;
    let top = element_top + layout.page_y_offset() - nav_height;

    Some(ScrollPlan {
        top,
        behavior: ScrollBehavior::for_motion_preference(layout.prefers_reduced_motion()),
        focus_target: id.to_string(),
        history_fragment: href.to_string(),
    })
}
