use thiserror::Error;

/// User-facing failure kinds for an attempt. None of these escape the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("one or more required fields are missing")]
    MissingFields,
    #[error("email address does not have a valid shape")]
    InvalidEmailShape,
    #[error("remote subscription call failed")]
    RemoteFailure,
    #[error("another subscription attempt is still pending")]
    AttemptInProgress,
}

impl SubmissionError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::MissingFields => "missing_fields",
            SubmissionError::InvalidEmailShape => "invalid_email",
            SubmissionError::RemoteFailure => "remote_failure",
            SubmissionError::AttemptInProgress => "attempt_in_progress",
        }
    }
}

/// Failure reported by a `SubscriptionEndpoint`.
///
/// Only the diagnostics sink ever sees these; the user gets a generic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("subscription rejected: {reason}")]
    Rejected { reason: String },
    #[error("subscription call aborted: {0}")]
    Aborted(String),
}
