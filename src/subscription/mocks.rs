// Recording doubles for workflow tests - no side effects

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::subscription::errors::RemoteError;
use crate::subscription::traits::*;
use crate::subscription::types::*;

#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Accept,
    Reject(RemoteError),
    Panic,
}

/// Endpoint that replays scripted responses after a fixed delay and records
/// every request it receives. Accepts once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedEndpoint {
    delay: Duration,
    script: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<SubscriptionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedEndpoint {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn then(self, response: ScriptedResponse) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SubscriptionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionEndpoint for ScriptedEndpoint {
    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<SubscriptionAck, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let response = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedResponse::Accept);

        tokio::time::sleep(self.delay).await;

        match response {
            ScriptedResponse::Accept => Ok(SubscriptionAck {
                confirmation_id: format!("confirm-{}", self.call_count()),
                received_at: chrono::Utc::now(),
            }),
            ScriptedResponse::Reject(err) => Err(err),
            ScriptedResponse::Panic => panic!("scripted endpoint panic"),
        }
    }
}

/// Analytics sink that records events, optionally failing every call
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    pub events: Mutex<Vec<SignupEvent>>,
    pub fail: bool,
}

impl RecordingAnalytics {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<SignupEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: &SignupEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            anyhow::bail!("analytics script not loaded");
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub errors: Mutex<Vec<RemoteError>>,
}

impl RecordingDiagnostics {
    pub fn errors(&self) -> Vec<RemoteError> {
        self.errors.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn record(&self, error: &RemoteError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}
