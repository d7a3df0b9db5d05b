// Value types for a single subscription attempt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::SubmissionError;

/// Raw form values exactly as the page hands them over.
///
/// Each field is `None` when the form did not carry it at all (an unchecked
/// checkbox, for instance) and `Some` with the untrimmed text otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub consent: Option<String>,
}

impl RawSubmission {
    pub fn new(name: &str, email: &str, consent: bool) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            consent: consent.then(|| "on".to_string()),
        }
    }
}

/// Lifecycle status of one attempt.
///
/// `Validating` is never observed from outside: validation is synchronous and
/// completes before the workflow yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttemptStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

impl AttemptStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptStatus::Success | AttemptStatus::Error)
    }
}

/// A validated attempt. Only constructed once every field has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAttempt {
    pub name: String,
    pub email: String,
    pub consent: bool,
}

impl SubmissionAttempt {
    pub fn to_request(&self) -> SubscriptionRequest {
        SubscriptionRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            consent: self.consent,
        }
    }
}

/// Payload handed to the remote subscription endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub name: String,
    pub email: String,
    pub consent: bool,
}

/// Acknowledgement returned by an endpoint that accepted the subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionAck {
    pub confirmation_id: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// Message rendered next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub kind: MessageKind,
    pub text: String,
    /// ARIA role, always `alert` so assistive technology reads it immediately
    pub role: &'static str,
}

impl FlashMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            role: "alert",
        }
    }

    /// CSS class list the page applies to the message container
    pub fn css_class(&self) -> String {
        format!("form-message {}", self.kind.as_str())
    }
}

/// Analytics payload emitted after a successful signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupEvent {
    pub email: String,
    pub method: String,
}

/// Terminal result of `SubscriptionWorkflow::submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { message: String },
    Error { error: SubmissionError, message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message } | Outcome::Error { message, .. } => message,
        }
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Error { error, .. } => Some(error),
        }
    }

    pub fn status(&self) -> AttemptStatus {
        match self {
            Outcome::Success { .. } => AttemptStatus::Success,
            Outcome::Error { .. } => AttemptStatus::Error,
        }
    }
}
