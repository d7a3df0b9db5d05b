//! Tests for the page enhancements around the signup form.
//! Testing library/framework: Rust built-in test framework, tokio-test for the async pieces.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use signup_flow::page::accessibility::{MAIN_CONTENT_ID, SUBSCRIBE_SECTION_ID};
use signup_flow::page::{
    announce_page_load, mark_active, plan_anchor_scroll, shortcut_for, submits_on_enter,
    Announcer, Debouncer, FocusTarget, KeyPress, NavLink, NavigationTiming, PageLayout,
    ScrollBehavior, Shortcut,
};
use signup_flow::SignupConfig;

/// Fixed page geometry
struct StaticLayout {
    tops: HashMap<&'static str, f64>,
    offset: f64,
    reduced_motion: bool,
}

impl PageLayout for StaticLayout {
    fn element_top(&self, id: &str) -> Option<f64> {
        self.tops.get(id).copied()
    }

    fn page_y_offset(&self) -> f64 {
        self.offset
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

fn landing_page(reduced_motion: bool) -> StaticLayout {
    StaticLayout {
        tops: HashMap::from([("subscribe", 1200.0), ("features", 640.0)]),
        offset: 300.0,
        reduced_motion,
    }
}

#[derive(Default)]
struct Transcript {
    lines: Mutex<Vec<String>>,
}

impl Announcer for Transcript {
    fn announce(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

#[test]
fn navigation_marks_the_page_from_the_location() {
    let config = SignupConfig::default();
    let mut links: Vec<NavLink> = ["index.html", "about.html", "pricing.html"]
        .iter()
        .map(|href| NavLink::new(href))
        .collect();

    assert_eq!(mark_active(&mut links, "/site/about.html", &config.page.default_page), 1);
    assert!(links[1].active);
    assert_eq!(links[1].aria_current, Some("page"));

    // Navigating to the root hands the state back to the default page
    assert_eq!(mark_active(&mut links, "/", &config.page.default_page), 1);
    assert!(links[0].active);
    assert!(!links[1].active);
    assert_eq!(links[1].aria_current, None);
}

#[test]
fn anchor_scroll_lands_below_the_fixed_nav() {
    let config = SignupConfig::default();
    let layout = landing_page(false);

    let plan = plan_anchor_scroll("#subscribe", &layout, config.page.nav_height_px)
        .expect("known anchor");
    assert_eq!(plan.top, 1200.0 + 300.0 - 80.0);
    assert_eq!(plan.behavior, ScrollBehavior::Smooth);
    assert_eq!(plan.focus_target, "subscribe");
    assert_eq!(plan.history_fragment, "#subscribe");
}

#[test]
fn anchor_scroll_respects_reduced_motion_and_skips_unknown_targets() {
    let layout = landing_page(true);

    let plan = plan_anchor_scroll("#features", &layout, 80.0).expect("known anchor");
    assert_eq!(plan.behavior, ScrollBehavior::Instant);

    assert!(plan_anchor_scroll("#", &layout, 80.0).is_none());
    assert!(plan_anchor_scroll("#pricing", &layout, 80.0).is_none());
    assert!(plan_anchor_scroll("about.html", &layout, 80.0).is_none());
}

#[test]
fn keyboard_shortcuts_only_fire_outside_form_controls() {
    let on_body = KeyPress {
        key: "s".to_string(),
        alt: true,
        target: FocusTarget::Other,
    };
    assert_eq!(
        shortcut_for(&on_body),
        Some(Shortcut::JumpToSubscribe {
            section_id: SUBSCRIBE_SECTION_ID
        })
    );

    let back = KeyPress {
        key: "t".to_string(),
        ..on_body.clone()
    };
    assert_eq!(
        shortcut_for(&back),
        Some(Shortcut::BackToTop {
            focus_id: MAIN_CONTENT_ID
        })
    );

    let typing = KeyPress {
        target: FocusTarget::Input {
            input_type: "email".to_string(),
        },
        ..on_body
    };
    assert_eq!(shortcut_for(&typing), None);

    assert!(submits_on_enter("Enter", "email"));
    assert!(!submits_on_enter("Enter", "submit"));
}

#[test]
fn page_load_is_announced_once() {
    let transcript = Arc::new(Transcript::default());

    tokio_test::block_on(async {
        announce_page_load("Acme Landing", transcript.clone(), Duration::from_millis(5))
            .await
            .unwrap();
    });

    assert_eq!(
        *transcript.lines.lock().unwrap(),
        vec!["Acme Landing - Page loaded".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn scroll_bursts_run_the_handler_once() {
    let config = SignupConfig::default();
    let debouncer = Debouncer::new(config.page.debounce_wait());
    let runs = Arc::new(AtomicUsize::new(0));

    for _ in 0..5 {
        let runs = runs.clone();
        debouncer.call(move || {
            runs.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    tokio::time::sleep(config.page.debounce_wait()).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn load_timing_is_derived_from_navigation_marks() {
    let timing = NavigationTiming {
        navigation_start: 1_000,
        request_start: 1_020,
        response_end: 1_180,
        load_event_end: 1_900,
    };

    let metrics = timing.metrics();
    metrics.log();
    assert_eq!(metrics.page_load_ms, 900);
    assert_eq!(metrics.server_response_ms, 160);
    assert_eq!(metrics.timing_event().value, 900);
}
