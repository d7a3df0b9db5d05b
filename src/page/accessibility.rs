// Keyboard shortcuts, Enter-to-submit and live-region announcements

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Element that currently has keyboard focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// An `<input>` with its `type` attribute
    Input { input_type: String },
    TextArea,
    Select,
    Other,
}

impl FocusTarget {
    /// True when the user is typing into a form control
    pub fn is_editable(&self) -> bool {
        !matches!(self, FocusTarget::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub alt: bool,
    pub target: FocusTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortcut {
    /// Scroll to the subscription section and focus its first input
    JumpToSubscribe { section_id: &'static str },
    /// Scroll to the top and focus the main content
    BackToTop { focus_id: &'static str },
}

pub const SUBSCRIBE_SECTION_ID: &str = "subscribe";
pub const MAIN_CONTENT_ID: &str = "main-content";

/// Enter inside any input except a submit button submits the form
pub fn submits_on_enter(key: &str, input_type: &str) -> bool {
    key == "Enter" && input_type != "submit"
}

/// Map a document-level key press to a shortcut.
///
/// Shortcuts never fire while focus is in an input, textarea or select.
pub fn shortcut_for(press: &KeyPress) -> Option<Shortcut> {
    if press.target.is_editable() || !press.alt {
        return None;
    }

    match press.key.as_str() {
        "s" => Some(Shortcut::JumpToSubscribe {
            section_id: SUBSCRIBE_SECTION_ID,
        }),
        "t" => Some(Shortcut::BackToTop {
            focus_id: MAIN_CONTENT_ID,
        }),
        _ => None,
    }
}

/// Attributes of the visually hidden status region used for announcements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRegion {
    pub id: &'static str,
    pub role: &'static str,
    pub aria_live: &'static str,
    pub aria_atomic: bool,
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self {
            id: "page-announcer",
            role: "status",
            aria_live: "polite",
            aria_atomic: true,
        }
    }
}

impl LiveRegion {
    /// Inline style that keeps the region off-screen but readable
    pub fn visually_hidden_style(&self) -> &'static str {
        "position:absolute;left:-10000px;width:1px;height:1px;overflow:hidden"
    }
}

/// Writes text into a live region
pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str);
}

/// Announce the page title once `delay` has passed
pub fn announce_page_load(title: &str, announcer: Arc<dyn Announcer>, delay: Duration) -> JoinHandle<()> {
    let text = format!("{title} - Page loaded");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        announcer.announce(&text);
        tracing::debug!(text = %text, "Page load announced");
    })
}
