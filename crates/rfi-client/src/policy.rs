//! Per-call timeout and retry policy.

use std::time::Duration;

use rfi_core::constants::DEFAULT_BACKOFF_MS;

/// Timeout and retry settings applied to every backend call.
///
/// The default performs exactly one attempt with no timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPolicy {
    /// Upper bound on a single attempt (`None` = wait indefinitely).
    pub timeout: Option<Duration>,
    /// Additional attempts after the first one fails with a retryable error.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each further retry.
    pub initial_backoff: Duration,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            max_retries: 0,
            initial_backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
        }
    }
}

impl RequestPolicy {
    /// Delay to wait before retry number `retry` (0-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }

    /// Total number of attempts the policy allows.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
