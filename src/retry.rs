use std::time::Duration;

use log::warn;
use rand::Rng;

use crate::constants::{FORBIDDEN_BACKOFF_MAX, FORBIDDEN_BACKOFF_MIN, GUILD_FETCH_ATTEMPTS, TRANSPORT_BACKOFF_STEP};
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub forbidden_backoff_min: Duration,
    pub forbidden_backoff_max: Duration,
    pub transport_backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: GUILD_FETCH_ATTEMPTS,
            forbidden_backoff_min: FORBIDDEN_BACKOFF_MIN,
            forbidden_backoff_max: FORBIDDEN_BACKOFF_MAX,
            transport_backoff_step: TRANSPORT_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    fn forbidden_delay(&self) -> Duration {
        let min = self.forbidden_backoff_min.as_millis() as u64;
        let max = self.forbidden_backoff_max.as_millis() as u64;

        if max <= min {
            return self.forbidden_backoff_min;
        }

        Duration::from_millis(rand::rng().random_range(min..max))
    }

    /// How long to wait before the next attempt, or `None` when `result`
    /// should be handed back as is.
    fn delay_after<T>(&self, attempt: u32, result: &Result<T, ApiError>) -> Option<Duration> {
        if attempt + 1 >= self.attempts.max(1) {
            return None;
        }

        match result {
            Err(err) if err.is_forbidden() => Some(self.forbidden_delay()),
            Err(ApiError::Transport(_)) => Some(self.transport_backoff_step * (attempt + 1)),
            _ => None,
        }
    }
}

/// Runs `operation` until it succeeds, fails with something other than a 403
/// or a transport error, or runs out of attempts. The attempt number starts
/// at 0.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;

    loop {
        let result = operation(attempt).await;

        let Some(delay) = policy.delay_after(attempt, &result) else {
            return result;
        };

        if let Err(err) = &result {
            warn!("attempt {} of {} failed: {}, retrying in {:?}", attempt + 1, policy.attempts, err, delay);
        }

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
