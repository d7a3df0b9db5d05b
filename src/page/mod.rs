// Page Module - progressive enhancements around the signup form
//
// Navigation state, anchor scrolling, keyboard/screen-reader affordances and
// load timing. Each piece plans what the page should do; the host applies it.

pub mod accessibility;
pub mod debounce;
pub mod navigation;
pub mod performance;
pub mod scroll;

pub use accessibility::{announce_page_load, shortcut_for, submits_on_enter, Announcer, FocusTarget, KeyPress, LiveRegion, Shortcut};
pub use debounce::Debouncer;
pub use navigation::{current_page, mark_active, NavLink};
pub use performance::{NavigationTiming, PageLoadMetrics};
pub use scroll::{plan_anchor_scroll, PageLayout, ScrollBehavior, ScrollPlan};
