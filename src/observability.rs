use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

use crate::subscription::errors::SubmissionError;

/// Subscription attempt counters, one set per workflow
#[derive(Debug, Default)]
pub struct SubmissionMetrics {
    pub attempts: AtomicU64,
    pub successes: AtomicU64,
    pub validation_failures: AtomicU64,
    pub remote_failures: AtomicU64,
    pub overlapping_rejections: AtomicU64,
}

impl SubmissionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, error: &SubmissionError) {
        let counter = match error {
            SubmissionError::MissingFields | SubmissionError::InvalidEmailShape => {
                &self.validation_failures
            }
            SubmissionError::RemoteFailure => &self.remote_failures,
            SubmissionError::AttemptInProgress => &self.overlapping_rejections,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> SubmissionStats {
        SubmissionStats {
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            overlapping_rejections: self.overlapping_rejections.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Submission metrics: attempts={}, successes={}, validation_failures={}, remote_failures={}, overlapping={}",
            stats.attempts,
            stats.successes,
            stats.validation_failures,
            stats.remote_failures,
            stats.overlapping_rejections
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStats {
    pub attempts: u64,
    pub successes: u64,
    pub validation_failures: u64,
    pub remote_failures: u64,
    pub overlapping_rejections: u64,
}

/// Time an operation and log its duration
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();
        info!(
            operation = %self.operation,
            duration_ms,
            "Operation completed"
        );
        duration_ms
    }
}
