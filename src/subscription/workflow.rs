use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

use super::errors::{RemoteError, SubmissionError};
use super::guard::SubmitGuard;
use super::messages::FlashMessenger;
use super::state_machine::{AttemptEvent, AttemptLifecycle};
use super::traits::*;
use super::types::*;
use super::validation;
use crate::config::{FormConfig, SignupConfig};
use crate::observability::{OperationTimer, SubmissionMetrics};
use crate::telemetry::{create_submission_span, generate_correlation_id};

const IN_PROGRESS_MESSAGE: &str = "A subscription is already being processed.";

/// Everything the workflow talks to, injected at construction
#[derive(Clone)]
pub struct Collaborators {
    pub form: Arc<dyn FormDataSource>,
    pub endpoint: Arc<dyn SubscriptionEndpoint>,
    pub affordance: Arc<dyn SubmitAffordance>,
    pub messages: Arc<dyn MessageSink>,
    pub diagnostics: Arc<dyn DiagnosticsSink>,
    /// Optional; the workflow behaves identically without it
    pub analytics: Option<Arc<dyn AnalyticsSink>>,
}

/// Runs subscription attempts from raw input to a terminal message.
///
/// At most one attempt is in flight at a time. The submit affordance is held
/// disabled by a [`SubmitGuard`] from the moment validation passes until the
/// endpoint call settles.
pub struct SubscriptionWorkflow {
    form: Arc<dyn FormDataSource>,
    endpoint: Arc<dyn SubscriptionEndpoint>,
    affordance: Arc<dyn SubmitAffordance>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    messenger: FlashMessenger,
    settings: FormConfig,
    analytics_method: String,
    in_flight: Arc<AtomicBool>,
    metrics: Arc<SubmissionMetrics>,
}

impl SubscriptionWorkflow {
    pub fn new(collaborators: Collaborators, config: &SignupConfig) -> Self {
        let analytics = if config.analytics.enabled {
            collaborators.analytics
        } else {
            None
        };

        Self {
            form: collaborators.form,
            endpoint: collaborators.endpoint,
            affordance: collaborators.affordance,
            diagnostics: collaborators.diagnostics,
            analytics,
            messenger: FlashMessenger::new(collaborators.messages, config.form.message_display()),
            settings: config.form.clone(),
            analytics_method: config.analytics.method.clone(),
            in_flight: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(SubmissionMetrics::new()),
        }
    }

    /// True while an attempt holds the submit affordance
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn metrics(&self) -> &SubmissionMetrics {
        &self.metrics
    }

    /// Read the current form values and submit them
    pub async fn submit_form(&self) -> Outcome {
        let raw = self.form.read();
        self.submit(raw).await
    }

    /// Run one attempt. Never fails: every error becomes an `Outcome::Error`.
    pub async fn submit(&self, raw: RawSubmission) -> Outcome {
        let correlation_id = generate_correlation_id();
        let span = create_submission_span(&correlation_id);
        self.run_attempt(raw, correlation_id).instrument(span).await
    }

    async fn run_attempt(&self, raw: RawSubmission, correlation_id: String) -> Outcome {
        let timer = OperationTimer::new("subscription_attempt");
        self.metrics.record_attempt();
        let mut attempt = AttemptLifecycle::start(correlation_id);

        let validated = match validation::validate(&raw) {
            Ok(validated) => validated,
            Err(error) => {
                warn!(code = error.code(), "Subscription rejected by validation");
                attempt.handle(&AttemptEvent::Rejected { error });
                timer.finish();
                return self.report_failure(error);
            }
        };

        let guard = match SubmitGuard::acquire(
            &self.in_flight,
            &self.affordance,
            &self.settings.busy_label,
        ) {
            Ok(guard) => guard,
            Err(error) => {
                warn!("Subscription ignored: another attempt is still pending");
                self.metrics.record_failure(&error);
                return Outcome::Error {
                    error,
                    message: IN_PROGRESS_MESSAGE.to_string(),
                };
            }
        };

        attempt.handle(&AttemptEvent::Dispatched);
        info!(status = ?attempt.inner().status(), "Submitting subscription");

        let (result, guard) = self.call_endpoint(validated.to_request(), guard).await;
        let outcome = match result {
            Ok(ack) => {
                attempt.handle(&AttemptEvent::Resolved);
                info!(confirmation_id = %ack.confirmation_id, "Subscription accepted");

                let message = self.settings.success_message(&validated.name);
                self.messenger.show(MessageKind::Success, message.clone());
                self.form.reset();
                self.track_signup(&validated.email);
                self.metrics.record_success();
                Outcome::Success { message }
            }
            Err(err) => {
                self.diagnostics.record(&err);
                attempt.handle(&AttemptEvent::Failed);
                self.report_failure(SubmissionError::RemoteFailure)
            }
        };

        // Release last, after every UI update for this attempt
        drop(guard);
        debug!(status = ?attempt.inner().status(), "Attempt finished");
        timer.finish();
        outcome
    }

    /// Run the endpoint call on its own task, which owns the guard until the
    /// call settles.
    ///
    /// A panicking endpoint surfaces as `RemoteError::Aborted` and releases the
    /// guard while unwinding. If the caller stops polling, the task keeps the
    /// guard until the call finishes, so no second call can overlap it.
    async fn call_endpoint(
        &self,
        request: SubscriptionRequest,
        guard: SubmitGuard,
    ) -> (Result<SubscriptionAck, RemoteError>, Option<SubmitGuard>) {
        let endpoint = Arc::clone(&self.endpoint);
        let handle = tokio::spawn(
            async move {
                let result = endpoint.subscribe(&request).await;
                (result, guard)
            }
            .in_current_span(),
        );

        match handle.await {
            Ok((result, guard)) => (result, Some(guard)),
            Err(join_error) => (Err(RemoteError::Aborted(join_error.to_string())), None),
        }
    }

    fn report_failure(&self, error: SubmissionError) -> Outcome {
        let message = match error {
            SubmissionError::MissingFields => self.settings.missing_fields_message.clone(),
            SubmissionError::InvalidEmailShape => self.settings.invalid_email_message.clone(),
            SubmissionError::RemoteFailure => self.settings.failure_message.clone(),
            SubmissionError::AttemptInProgress => IN_PROGRESS_MESSAGE.to_string(),
        };
        self.metrics.record_failure(&error);
        self.messenger.show(MessageKind::Error, message.clone());
        Outcome::Error { error, message }
    }

    fn track_signup(&self, email: &str) {
        let Some(analytics) = &self.analytics else {
            return;
        };
        let event = SignupEvent {
            email: email.to_string(),
            method: self.analytics_method.clone(),
        };
        if let Err(e) = analytics.track(&event) {
            debug!(error = %e, "Analytics tracking failed, ignoring");
        }
    }
}
