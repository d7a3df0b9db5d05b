// Collaborator interfaces injected into the workflow

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::errors::RemoteError;
use super::types::{FlashMessage, RawSubmission, SignupEvent, SubscriptionAck, SubscriptionRequest};

/// Source of the raw form values
#[cfg_attr(test, automock)]
pub trait FormDataSource: Send + Sync {
    /// Read `name`, `email` and `consent` as the form currently holds them
    fn read(&self) -> RawSubmission;

    /// Clear every field
    fn reset(&self);
}

/// Remote subscription call. Assumed to always terminate.
#[async_trait]
pub trait SubscriptionEndpoint: Send + Sync {
    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<SubscriptionAck, RemoteError>;
}

/// The submit button, or whatever stands in for it
#[cfg_attr(test, automock)]
pub trait SubmitAffordance: Send + Sync {
    /// Block further submissions and show `busy_label`
    fn disable(&self, busy_label: &str);

    /// Restore the original label and accept submissions again
    fn enable(&self);
}

/// Renders flash messages next to the form
#[cfg_attr(test, automock)]
pub trait MessageSink: Send + Sync {
    fn render(&self, message: &FlashMessage);

    fn hide(&self);
}

/// Best-effort analytics. Errors are logged and otherwise ignored.
#[cfg_attr(test, automock)]
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &SignupEvent) -> anyhow::Result<()>;
}

/// Receives the raw endpoint error for logging
#[cfg_attr(test, automock)]
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, error: &RemoteError);
}
