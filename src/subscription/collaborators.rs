// In-process collaborator implementations used by the CLI and by hosts that
// keep page state in memory

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

use super::errors::RemoteError;
use super::traits::{AnalyticsSink, DiagnosticsSink, FormDataSource, MessageSink, SubmitAffordance};
use super::types::{FlashMessage, RawSubmission, SignupEvent};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Form fields held in memory
#[derive(Debug, Default)]
pub struct InMemoryForm {
    fields: Mutex<RawSubmission>,
}

impl InMemoryForm {
    pub fn new(raw: RawSubmission) -> Self {
        Self {
            fields: Mutex::new(raw),
        }
    }

    /// Replace the current field values, as a user typing would
    pub fn fill(&self, raw: RawSubmission) {
        *lock(&self.fields) = raw;
    }
}

impl FormDataSource for InMemoryForm {
    fn read(&self) -> RawSubmission {
        lock(&self.fields).clone()
    }

    fn reset(&self) {
        *lock(&self.fields) = RawSubmission::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

/// Submit button that remembers its label while busy
#[derive(Debug)]
pub struct SubmitButton {
    state: Mutex<ButtonState>,
    original_label: Mutex<Option<String>>,
}

impl SubmitButton {
    pub fn new(label: &str) -> Self {
        Self {
            state: Mutex::new(ButtonState {
                label: label.to_string(),
                disabled: false,
            }),
            original_label: Mutex::new(None),
        }
    }

    pub fn state(&self) -> ButtonState {
        lock(&self.state).clone()
    }

    pub fn is_disabled(&self) -> bool {
        lock(&self.state).disabled
    }
}

impl SubmitAffordance for SubmitButton {
    fn disable(&self, busy_label: &str) {
        let mut state = lock(&self.state);
        let mut original = lock(&self.original_label);
        if original.is_none() {
            *original = Some(state.label.clone());
        }
        state.label = busy_label.to_string();
        state.disabled = true;
    }

    fn enable(&self) {
        let mut state = lock(&self.state);
        if let Some(label) = lock(&self.original_label).take() {
            state.label = label;
        }
        state.disabled = false;
    }
}

/// Message container kept in memory: what is visible now, and everything
/// that was ever shown
#[derive(Debug, Default)]
pub struct MessageBoard {
    visible: Mutex<Option<FlashMessage>>,
    history: Mutex<Vec<FlashMessage>>,
    hides: AtomicUsize,
}

impl MessageBoard {
    pub fn visible(&self) -> Option<FlashMessage> {
        lock(&self.visible).clone()
    }

    pub fn history(&self) -> Vec<FlashMessage> {
        lock(&self.history).clone()
    }

    pub fn hide_count(&self) -> usize {
        self.hides.load(Ordering::Acquire)
    }
}

impl MessageSink for MessageBoard {
    fn render(&self, message: &FlashMessage) {
        *lock(&self.visible) = Some(message.clone());
        lock(&self.history).push(message.clone());
    }

    fn hide(&self) {
        *lock(&self.visible) = None;
        self.hides.fetch_add(1, Ordering::AcqRel);
    }
}

/// Prints messages to stdout
#[derive(Debug, Default)]
pub struct ConsoleMessageSink;

impl MessageSink for ConsoleMessageSink {
    fn render(&self, message: &FlashMessage) {
        let icon = match message.kind {
            super::types::MessageKind::Success => "✅",
            super::types::MessageKind::Error => "❌",
        };
        println!("{icon} {}", message.text);
    }

    fn hide(&self) {}
}

/// Emits the signup conversion events as structured log lines
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &SignupEvent) -> anyhow::Result<()> {
        info!(
            analytics.event = "newsletter_signup",
            method = %event.method,
            "Analytics event"
        );
        info!(analytics.event = "Lead", "Analytics conversion");
        info!(email = %event.email, "Subscription tracked");
        Ok(())
    }
}

/// Logs endpoint failures
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, err: &RemoteError) {
        error!(error = %err, "Subscription error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::types::MessageKind;

    #[test]
    fn form_reset_clears_all_fields() {
        let form = InMemoryForm::new(RawSubmission::new("Ada", "ada@example.com", true));
        assert_eq!(form.read().name.as_deref(), Some("Ada"));

        form.reset();
        assert_eq!(form.read(), RawSubmission::default());
    }

    #[test]
    fn button_restores_original_label() {
        let button = SubmitButton::new("Subscribe");
        button.disable("Subscribing...");
        assert_eq!(
            button.state(),
            ButtonState {
                label: "Subscribing...".to_string(),
                disabled: true
            }
        );

        button.enable();
        assert_eq!(button.state().label, "Subscribe");
        assert!(!button.is_disabled());
    }

    #[test]
    fn message_board_tracks_visibility() {
        let board = MessageBoard::default();
        board.render(&FlashMessage::new(MessageKind::Success, "hi"));
        assert_eq!(board.visible().map(|m| m.text), Some("hi".to_string()));

        board.hide();
        assert!(board.visible().is_none());
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.hide_count(), 1);
    }
}
