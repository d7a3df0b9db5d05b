use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::errors::RemoteError;
use super::traits::SubscriptionEndpoint;
use super::types::{SubscriptionAck, SubscriptionRequest};
use crate::telemetry::generate_correlation_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationMode {
    AlwaysSucceed,
    AlwaysFail(RemoteError),
}

/// Stand-in for a real subscription backend: waits a fixed delay, then
/// answers according to its mode.
///
/// Replace with a real endpoint in production; nothing here talks to the
/// network.
#[derive(Debug, Clone)]
pub struct SimulatedEndpoint {
    delay: Duration,
    mode: SimulationMode,
}

impl SimulatedEndpoint {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            mode: SimulationMode::AlwaysSucceed,
        }
    }

    pub fn failing(delay: Duration, error: RemoteError) -> Self {
        Self {
            delay,
            mode: SimulationMode::AlwaysFail(error),
        }
    }
}

#[async_trait]
impl SubscriptionEndpoint for SimulatedEndpoint {
    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<SubscriptionAck, RemoteError> {
        let payload = serde_json::to_string(request)
            .map_err(|e| RemoteError::Transport(format!("could not encode request: {e}")))?;
        debug!(
            payload = %payload,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating subscription request"
        );

        tokio::time::sleep(self.delay).await;

        match &self.mode {
            SimulationMode::AlwaysSucceed => Ok(SubscriptionAck {
                confirmation_id: generate_correlation_id(),
                received_at: chrono::Utc::now(),
            }),
            SimulationMode::AlwaysFail(err) => Err(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubscriptionRequest {
        SubscriptionRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            consent: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_delay() {
        let endpoint = SimulatedEndpoint::new(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();

        let ack = endpoint.subscribe(&request()).await.expect("simulated success");

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(!ack.confirmation_id.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_mode_returns_configured_error() {
        let endpoint = SimulatedEndpoint::failing(
            Duration::from_millis(10),
            RemoteError::Transport("connection reset".to_string()),
        );

        let err = endpoint.subscribe(&request()).await.unwrap_err();
        assert_eq!(err, RemoteError::Transport("connection reset".to_string()));
    }
}
