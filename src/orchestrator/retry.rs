use rand::Rng;
use std::time::Duration;

use crate::config::RetryPolicy;

/// Backoff delay before retry number `attempt` (0-based), with up to 25%
/// random jitter on top so repeated runs do not hit the portal in lockstep
pub(crate) fn jittered_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let base = policy.delay_for_attempt(attempt);
    let jitter_ms = rand::rng().random_range(0..=base.as_millis() as u64 / 4);
    base + Duration::from_millis(jitter_ms)
}
