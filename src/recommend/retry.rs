use super::clock::Clock;
use crate::config::RetryConfig;
use crate::error::AdvisorError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run an advisory call, retrying transient failures after a fixed delay.
///
/// Non-transient errors are returned after the first attempt.
pub async fn retry_transient<F, Fut, T>(
    config: &RetryConfig,
    clock: &dyn Clock,
    mut operation: F,
) -> Result<T, AdvisorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AdvisorError>>,
{
    let mut attempts = 0;
    let delay = Duration::from_millis(config.delay_ms);

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if !e.is_transient() => {
                warn!("Attempt {} failed permanently: {}", attempts, e);
                return Err(e);
            }
            Err(e) if attempts >= config.max_attempts => {
                warn!("All {} attempts failed: {}", attempts, e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "Attempt {} failed: {}. Retrying in {:?}...",
                    attempts, e, delay
                );
                clock.sleep(delay).await;
            }
        }
    }
}
