//! Caller-level retry for whole pipeline invocations.
//!
//! The places client never retries on its own. Binaries wrap
//! [`crate::RestaurantFinder::find_restaurants`] in [`retry_with_backoff`]
//! so that a transient search failure re-runs the full pipeline.

use std::future::Future;
use std::time::Duration;

use crate::error::FinderError;

const MAX_DELAY_MS: u64 = 30_000;

/// Delay before retry number `attempt` (1-based), before jitter.
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    backoff_base_ms
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10))
        .min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts while the
/// error reports [`FinderError::is_retriable`].
///
/// Back-off is `backoff_base_ms * 2^(attempt-1)` with ±25 % jitter, capped
/// at 30 s. Anything non-retriable is returned immediately.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-retriable error.
pub async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FinderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FinderError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retriable() || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(backoff_base_ms, attempt);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient search failure, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
