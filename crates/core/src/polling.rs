//! Bounded polling for eventually-consistent UI state
//!
//! Result rows can render after their table container is attached, so a
//! single zero count cannot tell "not rendered yet" apart from "absent".
//! [`PollPolicy`] re-probes a bounded number of times instead.

use std::future::Future;
use std::time::Duration;

use statesync_domain::{Result, SyncError, UiConfig};
use tracing::{debug, info};

/// Probe budget for a state-visibility retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, delay: Duration::ZERO }
    }
}

impl PollPolicy {
    /// # Errors
    /// Returns `SyncError::InvalidArgument` when `max_attempts` is zero.
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self> {
        Self::builder().max_attempts(max_attempts).delay(delay).build()
    }

    pub fn builder() -> PollPolicyBuilder {
        PollPolicyBuilder::default()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// # Errors
    /// Returns `SyncError::InvalidArgument` when `max_attempts` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(SyncError::InvalidArgument(
                "poll policy needs at least one attempt".to_string(),
            ));
        }
        Ok(())
    }

    /// Run `probe` until it reports a non-zero count or the budget is spent.
    ///
    /// Returns the first non-zero count, or 0 once every attempt came back
    /// empty. The delay is only slept between attempts. Probe errors are not
    /// retried.
    ///
    /// # Errors
    /// Propagates the first error returned by `probe`.
    pub async fn poll_until_nonzero<F, Fut>(&self, mut probe: F) -> Result<usize>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<usize>>,
    {
        for attempt in 1..=self.max_attempts {
            let count = probe(attempt).await?;
            if count > 0 {
                debug!(attempt, count, "probe observed rows");
                return Ok(count);
            }

            info!(attempt, max_attempts = self.max_attempts, "Retrying to get table row count");

            if attempt < self.max_attempts && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(0)
    }
}

impl TryFrom<&UiConfig> for PollPolicy {
    type Error = SyncError;

    fn try_from(config: &UiConfig) -> Result<Self> {
        Self::new(config.row_count_attempts, config.row_count_delay())
    }
}

/// Builder for [`PollPolicy`].
#[derive(Debug, Default)]
pub struct PollPolicyBuilder {
    policy: PollPolicy,
}

impl PollPolicyBuilder {
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.policy.delay = delay;
        self
    }

    /// # Errors
    /// See [`PollPolicy::validate`].
    pub fn build(self) -> Result<PollPolicy> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}
