use statig::prelude::*;

use super::errors::SubmissionError;
use super::types::AttemptStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptEvent {
    /// Validation failed before anything was sent
    Rejected { error: SubmissionError },
    /// Validation passed and the remote call has started
    Dispatched,
    /// The remote call resolved normally
    Resolved,
    /// The remote call rejected or aborted
    Failed,
}

/// Running state machine for one attempt
pub type AttemptMachine = StateMachine<AttemptLifecycle>;

/// Tracks one attempt from `Idle` to a terminal status.
///
/// A fresh tracker is built for every attempt; terminal states ignore all
/// further events so an attempt can never be reused.
#[derive(Debug, Default)]
pub struct AttemptLifecycle {
    pub correlation_id: String,
    status: AttemptStatus,
    error: Option<SubmissionError>,
}

impl AttemptLifecycle {
    pub fn new(correlation_id: String) -> Self {
        Self {
            correlation_id,
            ..Default::default()
        }
    }

    /// Build the running machine for a fresh attempt, starting in `Idle`
    pub fn start(correlation_id: String) -> AttemptMachine {
        Self::new(correlation_id).state_machine()
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn error(&self) -> Option<SubmissionError> {
        self.error
    }

    fn enter(&mut self, status: AttemptStatus) {
        tracing::debug!(
            correlation_id = %self.correlation_id,
            from = ?self.status,
            to = ?status,
            "Attempt status changed"
        );
        self.status = status;
    }
}

#[state_machine(initial = "State::idle()")]
impl AttemptLifecycle {
    #[state]
    fn idle(&mut self, event: &AttemptEvent) -> Outcome<State> {
        match event {
            AttemptEvent::Rejected { error } => {
                self.error = Some(*error);
                self.enter(AttemptStatus::Error);
                Transition(State::failed())
            }
            AttemptEvent::Dispatched => {
                self.enter(AttemptStatus::Submitting);
                Transition(State::submitting())
            }
            _ => Handled,
        }
    }

    #[state]
    fn submitting(&mut self, event: &AttemptEvent) -> Outcome<State> {
        match event {
            AttemptEvent::Resolved => {
                self.enter(AttemptStatus::Success);
                Transition(State::succeeded())
            }
            AttemptEvent::Failed => {
                self.error = Some(SubmissionError::RemoteFailure);
                self.enter(AttemptStatus::Error);
                Transition(State::failed())
            }
            _ => Handled,
        }
    }

    #[state]
    fn succeeded(&mut self, event: &AttemptEvent) -> Outcome<State> {
        tracing::debug!(?event, "Ignoring event for finished attempt");
        Handled
    }

    #[state]
    fn failed(&mut self, event: &AttemptEvent) -> Outcome<State> {
        tracing::debug!(?event, "Ignoring event for failed attempt");
        Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_attempt_reaches_success() {
        let mut sm = AttemptLifecycle::new("c-1".to_string()).state_machine();
        assert_eq!(sm.inner().status(), AttemptStatus::Idle);

        sm.handle(&AttemptEvent::Dispatched);
        assert_eq!(sm.inner().status(), AttemptStatus::Submitting);

        sm.handle(&AttemptEvent::Resolved);
        assert_eq!(sm.inner().status(), AttemptStatus::Success);
        assert_eq!(sm.inner().error(), None);
    }

    #[test]
    fn remote_failure_reaches_error() {
        let mut sm = AttemptLifecycle::new("c-2".to_string()).state_machine();
        sm.handle(&AttemptEvent::Dispatched);
        sm.handle(&AttemptEvent::Failed);

        assert_eq!(sm.inner().status(), AttemptStatus::Error);
        assert_eq!(sm.inner().error(), Some(SubmissionError::RemoteFailure));
    }

    #[test]
    fn invalid_attempt_never_submits() {
        let mut sm = AttemptLifecycle::new("c-3".to_string()).state_machine();
        sm.handle(&AttemptEvent::Rejected {
            error: SubmissionError::InvalidEmailShape,
        });
        assert_eq!(sm.inner().status(), AttemptStatus::Error);

        // Terminal: a later dispatch is ignored
        sm.handle(&AttemptEvent::Dispatched);
        assert_eq!(sm.inner().status(), AttemptStatus::Error);
        assert_eq!(sm.inner().error(), Some(SubmissionError::InvalidEmailShape));
    }

    #[test]
    fn resolve_before_dispatch_is_ignored() {
        let mut sm = AttemptLifecycle::new("c-4".to_string()).state_machine();
        sm.handle(&AttemptEvent::Resolved);
        assert_eq!(sm.inner().status(), AttemptStatus::Idle);
    }

    #[test]
    fn success_is_terminal() {
        let mut sm = AttemptLifecycle::new("c-5".to_string()).state_machine();
        sm.handle(&AttemptEvent::Dispatched);
        sm.handle(&AttemptEvent::Resolved);
        sm.handle(&AttemptEvent::Failed);
        assert_eq!(sm.inner().status(), AttemptStatus::Success);
    }
}
