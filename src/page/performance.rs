// Page load timing, derived from navigation timing marks

use serde::{Deserialize, Serialize};
use tracing::info;

/// Navigation timing marks in milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTiming {
    pub navigation_start: u64,
    pub request_start: u64,
    pub response_end: u64,
    pub load_event_end: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLoadMetrics {
    pub page_load_ms: u64,
    pub server_response_ms: u64,
}

/// `timing_complete` analytics payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingEvent {
    pub event: &'static str,
    pub name: &'static str,
    pub value: u64,
}

impl NavigationTiming {
    /// Marks that run backwards (load not finished yet) clamp to zero
    pub fn metrics(&self) -> PageLoadMetrics {
        PageLoadMetrics {
            page_load_ms: self.load_event_end.saturating_sub(self.navigation_start),
            server_response_ms: self.response_end.saturating_sub(self.request_start),
        }
    }
}

impl PageLoadMetrics {
    pub fn log(&self) {
        info!(
            page_load_ms = self.page_load_ms,
            server_response_ms = self.server_response_ms,
            "Performance metrics"
        );
    }

    pub fn timing_event(&self) -> TimingEvent {
        TimingEvent {
            event: "timing_complete",
            name: "page_load",
            value: self.page_load_ms,
        }
    }
}
