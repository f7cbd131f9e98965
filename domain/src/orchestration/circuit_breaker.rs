//! The circuit breaker: aborts the iteration loop after too many
//! consecutive agent-invocation failures.

use crate::core::CoreError;

/// Counts consecutive subprocess failures and trips once a threshold is
/// reached. The driver does not classify failures — every non-zero exit
/// counts, and any success resets the counter to zero.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    threshold: u32,
    consecutive_failures: u32,
}

impl CircuitBreaker {
    pub fn new(threshold: u32) -> Self {
        CircuitBreaker {
            threshold,
            consecutive_failures: 0,
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Resets the failure counter to zero.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Increments the failure counter, returning an error once it
    /// reaches the configured threshold.
    pub fn record_failure(&mut self) -> Result<(), CoreError> {
        self.consecutive_failures += 1;
        if self.consecutive_failures >= self.threshold {
            return Err(CoreError::CircuitBreakerTripped(self.threshold));
        }
        Ok(())
    }
}
