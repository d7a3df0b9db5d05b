use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::traits::MessageSink;
use super::types::{FlashMessage, MessageKind};

/// Shows success/error messages and hides them after a fixed duration.
///
/// Every `show` bumps a generation counter. A pending auto-hide only fires if
/// no newer message has been shown since, so a stale timer never clears a
/// fresh message.
#[derive(Clone)]
pub struct FlashMessenger {
    sink: Arc<dyn MessageSink>,
    display_for: Duration,
    generation: Arc<AtomicU64>,
}

impl FlashMessenger {
    pub fn new(sink: Arc<dyn MessageSink>, display_for: Duration) -> Self {
        Self {
            sink,
            display_for,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Render the message now and schedule its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, kind: MessageKind, text: impl Into<String>) -> JoinHandle<()> {
        let message = FlashMessage::new(kind, text);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.sink.render(&message);
        debug!(kind = kind.as_str(), generation, "Flash message shown");

        let sink = Arc::clone(&self.sink);
        let current = Arc::clone(&self.generation);
        let display_for = self.display_for;
        tokio::spawn(async move {
            tokio::time::sleep(display_for).await;
            if current.load(Ordering::Acquire) == generation {
                sink.hide();
                debug!(generation, "Flash message hidden");
            }
        })
    }
}
