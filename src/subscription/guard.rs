// Scoped lock over the submit affordance

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::SubmissionError;
use super::traits::SubmitAffordance;

/// Holds the submit affordance disabled for as long as it lives.
///
/// Dropping the guard re-enables the affordance and clears the in-flight
/// flag, so release happens on success, failure, panic and cancellation alike.
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
    affordance: Arc<dyn SubmitAffordance>,
}

impl SubmitGuard {
    /// Claim the in-flight flag and disable the affordance.
    ///
    /// Fails with `AttemptInProgress` when another guard is alive.
    pub fn acquire(
        in_flight: &Arc<AtomicBool>,
        affordance: &Arc<dyn SubmitAffordance>,
        busy_label: &str,
    ) -> Result<Self, SubmissionError> {
        if in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmissionError::AttemptInProgress);
        }

        affordance.disable(busy_label);
        Ok(Self {
            in_flight: Arc::clone(in_flight),
            affordance: Arc::clone(affordance),
        })
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.affordance.enable();
        self.in_flight.store(false, Ordering::Release);
    }
}
